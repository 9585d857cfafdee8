//! Configuration loading for the quoter service
//!
//! A single JSON file describes:
//! - Server bind address
//! - Quote defaults (iteration budget, timeout, strategy)
//! - RPC endpoints per chain
//! - Markets the service is allowed to quote

use foil_chain::ChainConfig;
use foil_core::{ChainId, MAX_ITERATIONS, Market, SearchStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Root configuration for the quoter service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoterConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub quoter: QuoteSettings,

    #[serde(default)]
    pub chains: Vec<ChainConfig>,

    #[serde(default)]
    pub markets: Vec<Market>,
}

impl QuoterConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quoter.validate()?;

        let mut chain_ids = HashSet::new();
        for chain in &self.chains {
            if !chain_ids.insert(chain.chain_id) {
                return Err(ConfigError::DuplicateChain(chain.chain_id));
            }
        }

        let mut market_keys = HashSet::new();
        for market in &self.markets {
            if !chain_ids.contains(&market.key.chain_id) {
                return Err(ConfigError::UnknownChain {
                    market: market.key.to_string(),
                    chain_id: market.key.chain_id,
                });
            }
            if !market_keys.insert(market.key) {
                return Err(ConfigError::DuplicateMarket(market.key.to_string()));
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Defaults applied to every quote request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSettings {
    /// Budget used when a request does not pass `maxIterations`
    #[serde(default = "default_max_iterations")]
    pub default_max_iterations: u32,

    /// Deadline for one quote; probes stop being issued once it passes
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub default_strategy: SearchStrategy,
}

fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

fn default_timeout_ms() -> Option<u64> {
    Some(15_000)
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            default_max_iterations: default_max_iterations(),
            timeout_ms: default_timeout_ms(),
            default_strategy: SearchStrategy::default(),
        }
    }
}

impl QuoteSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ITERATIONS).contains(&self.default_max_iterations) {
            return Err(ConfigError::InvalidQuoter(format!(
                "defaultMaxIterations must be between 1 and {}",
                MAX_ITERATIONS
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidQuoter(
                "timeoutMs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid quoter config: {0}")]
    InvalidQuoter(String),

    #[error("Chain {0} configured more than once")]
    DuplicateChain(ChainId),

    #[error("Market {market} references unconfigured chain {chain_id}")]
    UnknownChain { market: String, chain_id: ChainId },

    #[error("Market {0} configured more than once")]
    DuplicateMarket(String),
}
