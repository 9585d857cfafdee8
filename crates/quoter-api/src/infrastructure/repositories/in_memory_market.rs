use async_trait::async_trait;
use dashmap::DashMap;
use foil_core::{Address, ChainId, Market, MarketId, MarketKey};
use foil_ports::MarketRepository;
use std::sync::Arc;

/// In-memory registry of quotable markets
pub struct InMemoryMarketRepository {
    markets: Arc<DashMap<MarketKey, Market>>,
}

impl InMemoryMarketRepository {
    pub fn new() -> Self {
        InMemoryMarketRepository {
            markets: Arc::new(DashMap::new()),
        }
    }

    pub fn with_markets(markets: impl IntoIterator<Item = Market>) -> Self {
        let repo = Self::new();
        for market in markets {
            repo.add(market);
        }
        repo
    }

    /// Add or replace a market
    pub fn add(&self, market: Market) {
        self.markets.insert(market.key, market);
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

impl Default for InMemoryMarketRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryMarketRepository {
    fn clone(&self) -> Self {
        InMemoryMarketRepository {
            markets: Arc::clone(&self.markets),
        }
    }
}

#[async_trait]
impl MarketRepository for InMemoryMarketRepository {
    async fn find(
        &self,
        chain_id: ChainId,
        address: &Address,
        market_id: MarketId,
    ) -> Option<Market> {
        let key = MarketKey::new(chain_id, *address, market_id);
        self.markets.get(&key).map(|m| m.clone())
    }

    async fn all(&self) -> Vec<Market> {
        let mut markets: Vec<Market> = self
            .markets
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        markets.sort_by_key(|m| m.key);
        markets
    }
}
