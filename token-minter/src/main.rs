//! Token Minter server
//!
//! Serves the minting front-end and the `/mint` and `/owned-tokens` endpoints.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use token_minter::api::{self, ApiState};
use token_minter::config::MinterConfig;
use token_minter::core::{ChainPort, PinningPort};
use token_minter::pinning::PinataClient;
use token_minter::rpc_client::SolanaRpc;
use token_minter::services::MintService;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "token-minter")]
#[command(about = "SPL token minting gateway")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "minter.toml")]
    config: String,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MinterConfig::load(&cli.config)?;

    // Override log level if provided
    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }

    init_logging(&config);

    info!("Starting token minter");
    info!("RPC endpoint: {}", config.solana.rpc_url);
    info!(
        "Fee: {}, on-chain metadata: {}",
        if config.fee.enabled { config.fee.lamports.to_string() } else { "off".to_string() },
        config.metadata.enabled
    );

    config.ensure_directories()?;

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let timeout = Duration::from_secs(config.api.request_timeout_secs);
    let chain: Arc<dyn ChainPort> = Arc::new(SolanaRpc::new(
        config.solana.rpc_url.clone(),
        config.commitment()?,
        timeout,
    ));
    let pinning: Arc<dyn PinningPort> = Arc::new(PinataClient::new(&config.pinning, timeout)?);

    let config = Arc::new(config);
    let mint_service = Arc::new(MintService::new(&config, pinning, chain.clone())?);
    let state = ApiState::new(config.clone(), mint_service, chain);

    let api_server = api::start_server(state, &config.api).await?;

    info!("Token minter started. Press Ctrl+C to shutdown.");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        result = api_server => {
            if let Err(e) = result {
                error!("API server task error: {}", e);
            }
        }
    }

    info!("Shutting down token minter");
    Ok(())
}

fn init_logging(config: &MinterConfig) {
    let log_level = config
        .monitoring
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("token_minter={},tower_http=info", log_level).into()
    });

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
