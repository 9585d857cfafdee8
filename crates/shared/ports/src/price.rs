use async_trait::async_trait;
use foil_core::{MarketKey, U256};

use crate::error::PriceSourceError;

/// Port for a market's current reference price
#[async_trait]
pub trait ReferencePriceSource: Send + Sync {
    /// Reference price at 18 decimals. Zero means no price is available.
    async fn reference_price(&self, market: &MarketKey) -> Result<U256, PriceSourceError>;
}
