//! Reference price lookups.

use crate::contracts::IFoil;
use crate::rpc::price_error;
use alloy::primitives::U256;
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use foil_core::MarketKey;
use foil_ports::{PriceSourceError, ReferencePriceSource};

/// Reads `getReferencePrice(epochId)` from the market group.
#[derive(Clone)]
pub struct FoilReferencePrice {
    provider: DynProvider,
}

impl FoilReferencePrice {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ReferencePriceSource for FoilReferencePrice {
    async fn reference_price(&self, market: &MarketKey) -> Result<U256, PriceSourceError> {
        let call = IFoil::getReferencePriceCall {
            epochId: U256::from(market.market_id),
        };
        let tx = TransactionRequest::default()
            .to(market.address)
            .input(call.abi_encode().into());

        let ret = self.provider.call(tx).await.map_err(price_error)?;

        IFoil::getReferencePriceCall::abi_decode_returns(&ret)
            .map_err(|e| PriceSourceError::Malformed(e.to_string()))
    }
}
