//! Foil Ports
//!
//! Port definitions (traits) for the Foil position-size quoter.
//! These define the boundaries between the search and its collaborators.

mod chain;
mod error;
mod market;
mod price;
mod simulator;

pub use chain::{ChainDirectory, ChainHandle};
pub use error::{PriceSourceError, SimulationError, SimulationResult};
pub use market::MarketRepository;
pub use price::ReferencePriceSource;
pub use simulator::TradeSimulator;
