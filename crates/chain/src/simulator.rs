//! Trade simulation against a deployed Foil market group.

use crate::contracts::IFoil;
use crate::rpc::simulation_error;
use alloy::primitives::{Bytes, I256, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use foil_core::{MarketKey, SimulationOutcome};
use foil_ports::{SimulationError, SimulationResult, TradeSimulator};

const WORD: usize = 32;

/// Simulates trader positions with `eth_call` against `quoteCreateTraderPosition`.
#[derive(Clone)]
pub struct FoilTradeSimulator {
    provider: DynProvider,
}

impl FoilTradeSimulator {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TradeSimulator for FoilTradeSimulator {
    async fn simulate(&self, market: &MarketKey, size: I256) -> SimulationResult<SimulationOutcome> {
        let call = IFoil::quoteCreateTraderPositionCall {
            epochId: U256::from(market.market_id),
            size,
        };
        let tx = TransactionRequest::default()
            .to(market.address)
            .input(call.abi_encode().into());

        let ret = self.provider.call(tx).await.map_err(simulation_error)?;
        log::trace!("quoteCreateTraderPosition({}) on {} -> {} bytes", size, market, ret.len());

        decode_quote(&ret)
    }

    fn name(&self) -> &str {
        "FoilTradeSimulator"
    }
}

/// Decodes the quote return data.
///
/// Current deployments return `(requiredCollateral, fillPrice, price18DigitsAfterTrade)`.
/// Older deployments return only `requiredCollateral`; those outcomes carry a zero
/// fill price so callers can tell the price was not reported.
pub(crate) fn decode_quote(ret: &Bytes) -> SimulationResult<SimulationOutcome> {
    match ret.len() {
        WORD => Ok(SimulationOutcome::collateral_only(U256::from_be_slice(ret))),
        len if len >= 3 * WORD => {
            let decoded = IFoil::quoteCreateTraderPositionCall::abi_decode_returns(ret)
                .map_err(|e| SimulationError::Malformed(e.to_string()))?;
            Ok(SimulationOutcome::new(
                decoded.requiredCollateral,
                decoded.price18DigitsAfterTrade,
            ))
        }
        len => Err(SimulationError::Malformed(format!(
            "unexpected quote return length {len}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[u64]) -> Bytes {
        values
            .iter()
            .flat_map(|v| U256::from(*v).to_be_bytes::<32>())
            .collect::<Vec<u8>>()
            .into()
    }

    #[test]
    fn test_decode_full_quote() {
        let outcome = decode_quote(&words(&[500, 7, 11])).unwrap();

        assert_eq!(outcome.required_collateral, U256::from(500));
        assert_eq!(outcome.fill_price_after_trade, U256::from(11));
        assert!(outcome.reports_fill_price());
    }

    #[test]
    fn test_decode_collateral_only_quote() {
        let outcome = decode_quote(&words(&[500])).unwrap();

        assert_eq!(outcome.required_collateral, U256::from(500));
        assert!(!outcome.reports_fill_price());
    }

    #[test]
    fn test_decode_truncated_quote() {
        let err = decode_quote(&Bytes::from(vec![0u8; 7])).unwrap_err();
        assert!(matches!(err, SimulationError::Malformed(_)));

        let err = decode_quote(&words(&[1, 2])).unwrap_err();
        assert!(matches!(err, SimulationError::Malformed(_)));
    }
}
