//! Foil Core Domain
//!
//! Pure value types for the Foil position-size quoter.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Direction, MAX_ITERATIONS, Market, MarketKey, QuoteRequest, QuoteResult, SearchStrategy,
    SimulationOutcome,
};
pub use values::{ChainId, D18_DECIMALS, MarketId, Price, from_d18, to_d18, wad};

// Fixed-point integer types used across the workspace
pub use alloy_primitives::{Address, I256, U256};
