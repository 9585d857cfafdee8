use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Price;

/// Trade direction relative to the expected price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Long when the caller expects the price to rise, short when it should fall.
    /// Equal prices carry no direction.
    pub fn from_prices(current: Price, expected: Price) -> Option<Self> {
        if expected > current {
            Some(Direction::Long)
        } else if expected < current {
            Some(Direction::Short)
        } else {
            None
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Direction::Long)
    }

    /// Signed trade size for a magnitude. `None` if it does not fit an int256.
    pub fn sign(&self, magnitude: U256) -> Option<I256> {
        let size = I256::try_from(magnitude).ok()?;
        Some(match self {
            Direction::Long => size,
            Direction::Short => -size,
        })
    }

    /// Whether a post-trade price lies inside the band between the limit and
    /// the expected price. The limit side is exclusive, the expected side inclusive.
    pub fn accepts_fill(&self, fill: Price, limit: Price, expected: Price) -> bool {
        match self {
            Direction::Long => fill > limit && fill <= expected,
            Direction::Short => fill < limit && fill >= expected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
