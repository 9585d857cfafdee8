use clap::Parser;
use quoter_api::{QuoterConfig, QuoterService};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Foil position-size quoter
#[derive(Debug, Parser)]
#[command(author, version, about = "Foil position-size quoter API", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH", env = "QUOTER_CONFIG")]
    config: PathBuf,

    /// Override the configured bind host
    #[arg(long, value_name = "HOST", env = "HOST")]
    host: Option<String>,

    /// Override the configured port
    #[arg(long, value_name = "PORT", env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quoter_api=info,foil_quoter=info,foil_chain=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Loading configuration from: {}", args.config.display());
    let mut config = QuoterConfig::from_file(&args.config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Chains: {}", config.chains.len());
    tracing::info!("Markets: {}", config.markets.len());
    tracing::info!(
        "Quote budget: {} probes, timeout: {:?}, strategy: {}",
        config.quoter.default_max_iterations,
        config.quoter.timeout(),
        config.quoter.default_strategy
    );

    let service = QuoterService::from_config(config)?;

    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /ping");
    tracing::info!("  GET  /markets");
    tracing::info!(
        "  GET  /quoter/{{chainId}}/{{marketAddress}}/{{marketId}}?expectedPrice=&collateralAvailable="
    );

    service.run().await?;
    Ok(())
}
