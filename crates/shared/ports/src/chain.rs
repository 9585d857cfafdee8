use foil_core::ChainId;
use std::sync::Arc;

use crate::price::ReferencePriceSource;
use crate::simulator::TradeSimulator;

/// Read-only collaborators bound to one chain
#[derive(Clone)]
pub struct ChainHandle {
    pub chain_id: ChainId,
    pub simulator: Arc<dyn TradeSimulator>,
    pub prices: Arc<dyn ReferencePriceSource>,
}

impl ChainHandle {
    pub fn new(
        chain_id: ChainId,
        simulator: Arc<dyn TradeSimulator>,
        prices: Arc<dyn ReferencePriceSource>,
    ) -> Self {
        Self {
            chain_id,
            simulator,
            prices,
        }
    }
}

impl std::fmt::Debug for ChainHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainHandle")
            .field("chain_id", &self.chain_id)
            .field("simulator", &self.simulator.name())
            .finish()
    }
}

/// Lookup of per-chain collaborators
///
/// Handles are shared between concurrent requests; each quote still runs its
/// own independent search.
pub trait ChainDirectory: Send + Sync {
    fn chain(&self, chain_id: ChainId) -> Option<ChainHandle>;

    fn chain_ids(&self) -> Vec<ChainId>;
}
