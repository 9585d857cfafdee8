//! Mapping of JSON-RPC call failures onto port errors.
//!
//! An `eth_call` whose EVM execution fails (revert, out of gas, invalid
//! opcode, ...) tells the search that the probed size is infeasible. Node-side
//! failures such as rate limiting or an unreachable endpoint are upstream errors.

use alloy::transports::TransportError;
use foil_ports::{PriceSourceError, SimulationError};

/// `eth_call` reverted with return data
const EXECUTION_REVERTED: i64 = 3;
/// Limit exceeded (EIP-1474)
const LIMIT_EXCEEDED: i64 = -32005;
/// HTTP "too many requests" relayed as a JSON-RPC error code by some providers
const TOO_MANY_REQUESTS: i64 = 429;

/// Messages geth, reth, erigon and nethermind use for failed EVM execution
const EXECUTION_FAILURES: &[&str] = &[
    "revert",
    "out of gas",
    "gas required exceeds",
    "invalid opcode",
    "invalid jump",
    "stack underflow",
    "stack overflow",
    "write protection",
    "vm execution error",
];

/// Whether an error response from the node reports a failed EVM execution
/// rather than a node-side problem.
pub(crate) fn is_execution_failure(code: i64, message: &str, has_revert_data: bool) -> bool {
    if code == LIMIT_EXCEEDED || code == TOO_MANY_REQUESTS {
        return false;
    }
    if code == EXECUTION_REVERTED || has_revert_data {
        return true;
    }
    let message = message.to_ascii_lowercase();
    EXECUTION_FAILURES
        .iter()
        .any(|marker| message.contains(marker))
}

fn execution_failure(err: &TransportError) -> Option<String> {
    let payload = err.as_error_resp()?;
    let has_revert_data = payload.as_revert_data().is_some();
    is_execution_failure(payload.code, &payload.message, has_revert_data)
        .then(|| payload.message.to_string())
}

pub(crate) fn simulation_error(err: TransportError) -> SimulationError {
    match execution_failure(&err) {
        Some(reason) => SimulationError::Reverted(reason),
        None => SimulationError::Upstream(err.to_string()),
    }
}

pub(crate) fn price_error(err: TransportError) -> PriceSourceError {
    match execution_failure(&err) {
        Some(reason) => PriceSourceError::Reverted(reason),
        None => PriceSourceError::Upstream(err.to_string()),
    }
}
