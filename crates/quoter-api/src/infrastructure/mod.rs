pub mod config;
pub mod repositories;

pub use config::{ConfigError, QuoteSettings, QuoterConfig, ServerConfig};
pub use repositories::InMemoryMarketRepository;
