use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::values::{Price, from_d18};

/// Result of simulating a trade of a given size against a market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Collateral the trade would lock, 18 decimals
    pub required_collateral: U256,
    /// Market price once the trade is filled, 18 decimals.
    /// Zero when the deployed contract does not report it.
    pub fill_price_after_trade: U256,
}

impl SimulationOutcome {
    pub fn new(required_collateral: U256, fill_price_after_trade: U256) -> Self {
        Self {
            required_collateral,
            fill_price_after_trade,
        }
    }

    /// Outcome from a contract version that only reports collateral
    pub fn collateral_only(required_collateral: U256) -> Self {
        Self::new(required_collateral, U256::ZERO)
    }

    pub fn reports_fill_price(&self) -> bool {
        !self.fill_price_after_trade.is_zero()
    }

    /// Post-trade price as a decimal, `None` for the zero sentinel.
    ///
    /// A price too large to represent saturates to `Decimal::MAX`, which lies
    /// outside every acceptance band.
    pub fn fill_price(&self) -> Option<Price> {
        if !self.reports_fill_price() {
            return None;
        }
        Some(from_d18(self.fill_price_after_trade).unwrap_or(Decimal::MAX))
    }
}
