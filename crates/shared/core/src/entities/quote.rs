use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::direction::Direction;
use crate::values::Price;

/// Upper bound on simulator probes per quote
pub const MAX_ITERATIONS: u32 = 10;

/// How the search shrinks the candidate size between probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Halve after every rejection, stop at the first accepted size
    #[default]
    Halving,
    /// Bisect between the largest accepted and smallest rejected size
    Bisect,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Halving => "halving",
            SearchStrategy::Bisect => "bisect",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halving" => Ok(SearchStrategy::Halving),
            "bisect" => Ok(SearchStrategy::Bisect),
            other => Err(format!("unknown search strategy: {}", other)),
        }
    }
}

/// Immutable input of a single quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Reference price before the trade
    pub current_price: Price,
    /// Price the trade should move the market toward
    pub expected_price: Price,
    /// Inner bound on the post-trade price, defaults to `current_price`
    pub price_limit: Option<Price>,
    /// Ceiling on required collateral, 18 decimals
    pub collateral_available: U256,
    pub max_iterations: u32,
    pub strategy: SearchStrategy,
}

impl QuoteRequest {
    pub fn new(current_price: Price, expected_price: Price, collateral_available: U256) -> Self {
        Self {
            current_price,
            expected_price,
            price_limit: None,
            collateral_available,
            max_iterations: MAX_ITERATIONS,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_price_limit(mut self, price_limit: Price) -> Self {
        self.price_limit = Some(price_limit);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn effective_price_limit(&self) -> Price {
        self.price_limit.unwrap_or(self.current_price)
    }

    /// Probe budget clamped to `1..=MAX_ITERATIONS`
    pub fn iteration_budget(&self) -> u32 {
        self.max_iterations.clamp(1, MAX_ITERATIONS)
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::from_prices(self.current_price, self.expected_price)
    }
}

/// Largest accepted trade size for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResult {
    pub direction: Direction,
    /// Signed size, positive for long and negative for short, 18 decimals
    pub size: I256,
    pub current_price: Price,
    pub expected_price: Price,
    pub collateral_available: U256,
    /// Collateral the accepted size requires
    pub required_collateral: U256,
    /// Post-trade price used for acceptance
    pub fill_price: Price,
    /// Simulator calls spent
    pub probes: u32,
}
