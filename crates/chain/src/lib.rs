//! Foil Chain
//!
//! EVM adapters for the quoter ports: trade simulation and reference prices
//! read from Foil market group contracts over JSON-RPC.

pub mod contracts;
mod directory;
mod error;
mod price;
mod rpc;
mod simulator;
mod throttle;

pub use directory::{ChainConfig, FoilChainDirectory};
pub use error::ChainError;
pub use price::FoilReferencePrice;
pub use simulator::FoilTradeSimulator;
pub use throttle::ThrottledSimulator;
