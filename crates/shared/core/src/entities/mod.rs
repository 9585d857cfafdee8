mod direction;
mod market;
mod quote;
mod simulation;

pub use direction::Direction;
pub use market::{Market, MarketKey};
pub use quote::{MAX_ITERATIONS, QuoteRequest, QuoteResult, SearchStrategy};
pub use simulation::SimulationOutcome;
