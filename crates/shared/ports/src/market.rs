use async_trait::async_trait;
use foil_core::{Address, ChainId, Market, MarketId};

/// Repository of markets the service may quote
#[async_trait]
pub trait MarketRepository: Send + Sync {
    async fn find(
        &self,
        chain_id: ChainId,
        address: &Address,
        market_id: MarketId,
    ) -> Option<Market>;

    async fn all(&self) -> Vec<Market>;
}
