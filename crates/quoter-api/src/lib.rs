//! Foil Quoter API
//!
//! HTTP service answering "how large a position can I open on this market
//! with this much collateral before the price leaves my band?".
//!
//! # Architecture
//!
//! - **Application**: the max-size use case tying market lookup, reference
//!   price and the position-size search together
//! - **Infrastructure**: JSON configuration and the in-memory market registry
//! - **Presentation**: REST handlers
//!
//! On-chain access lives in `foil-chain`; the search itself in `foil-quoter`.
//!
//! # Example
//!
//! ```ignore
//! use quoter_api::{QuoterConfig, QuoterService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = QuoterConfig::from_file("quoter.json")?;
//!     QuoterService::from_config(config)?.run().await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use application::{GetMaxSizeQuery, GetMaxSizeUseCase, MaxSizeError};
pub use infrastructure::{
    ConfigError, InMemoryMarketRepository, QuoteSettings, QuoterConfig, ServerConfig,
};
pub use presentation::{ApiError, AppState, create_router};

use axum::Router;
use foil_chain::{ChainError, FoilChainDirectory};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The quoter HTTP server
pub struct QuoterService {
    pub config: QuoterConfig,
    pub markets: Arc<InMemoryMarketRepository>,
    pub chains: Arc<FoilChainDirectory>,
}

impl QuoterService {
    /// Wire one RPC provider per configured chain and register the markets
    pub fn from_config(config: QuoterConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        let chains = FoilChainDirectory::connect(&config.chains)?;
        Ok(Self::with_chains(config, chains))
    }

    /// Use an already built chain directory
    pub fn with_chains(config: QuoterConfig, chains: FoilChainDirectory) -> Self {
        let markets = Arc::new(InMemoryMarketRepository::with_markets(
            config.markets.iter().cloned(),
        ));

        QuoterService {
            config,
            markets,
            chains: Arc::new(chains),
        }
    }

    /// Create the REST API router
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.markets),
            Arc::clone(&self.chains),
            self.config.quoter.clone(),
        ));

        create_router(state)
    }

    /// Run the server until the process is stopped
    pub async fn run(self) -> Result<(), ServiceError> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let router = self.router();

        tracing::info!("Quoter API listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
