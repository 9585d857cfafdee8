use foil_ports::SimulationError;
use thiserror::Error;

/// Caller input that cannot be quoted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidQuote {
    #[error("Current price must be greater than 0")]
    NonPositiveCurrentPrice,

    #[error("Expected price must be greater than 0")]
    NonPositiveExpectedPrice,

    #[error("Expected price must be different from current price")]
    NoDirection,

    #[error("Collateral available is too large")]
    CollateralOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidQuote),

    /// Every probe within the budget was rejected, or the size collapsed to zero
    #[error("No feasible position size found after {probes} probes")]
    NoFeasibleSize { probes: u32 },

    #[error("Quote cancelled after {probes} probes")]
    Cancelled { probes: u32 },

    /// The simulator failed for a reason other than rejecting the size
    #[error("Simulator failure: {0}")]
    Simulator(SimulationError),
}

impl QuoteError {
    pub fn probes(&self) -> u32 {
        match self {
            QuoteError::NoFeasibleSize { probes } | QuoteError::Cancelled { probes } => *probes,
            QuoteError::InvalidRequest(_) | QuoteError::Simulator(_) => 0,
        }
    }
}
