use foil_core::ChainId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid RPC URL for chain {chain_id}: {reason}")]
    InvalidRpcUrl { chain_id: ChainId, reason: String },

    #[error("Chain {0} configured more than once")]
    DuplicateChain(ChainId),

    #[error("Rate limit for chain {0} must be greater than 0")]
    InvalidRateLimit(ChainId),
}
