use async_trait::async_trait;
use foil_core::{I256, MarketKey, SimulationOutcome};

use crate::error::SimulationResult;

/// Port for read-only trade simulation
///
/// Implementations must not mutate chain state and must tolerate being called
/// several times in quick succession for the same market.
#[async_trait]
pub trait TradeSimulator: Send + Sync {
    /// Simulate opening a position of `size` (positive long, negative short)
    async fn simulate(&self, market: &MarketKey, size: I256) -> SimulationResult<SimulationOutcome>;

    fn name(&self) -> &str {
        "TradeSimulator"
    }
}
