use thiserror::Error;

/// Failure of a single trade simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The contract rejected the size. Expected during a search.
    #[error("Simulation reverted: {0}")]
    Reverted(String),

    /// The node or network could not be reached
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// The simulator answered with data of the wrong shape
    #[error("Malformed simulation response: {0}")]
    Malformed(String),
}

impl SimulationError {
    /// Whether the failure only says the probed size is infeasible
    pub fn is_revert(&self) -> bool {
        matches!(self, SimulationError::Reverted(_))
    }
}

pub type SimulationResult<T> = std::result::Result<T, SimulationError>;

/// Failure reading a market's reference price
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceSourceError {
    #[error("Reference price call reverted: {0}")]
    Reverted(String),

    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Malformed price response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reverts_are_in_band() {
        assert!(SimulationError::Reverted("too large".into()).is_revert());
        assert!(!SimulationError::Upstream("timeout".into()).is_revert());
        assert!(!SimulationError::Malformed("short".into()).is_revert());
    }
}
