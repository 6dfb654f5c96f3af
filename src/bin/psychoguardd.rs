//! psychoguardd: PsychoGuard API daemon.
//!
//! Serves the manipulation-analysis JSON API and PDF reports over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use psychoguard::PsychoGuardError;
use psychoguard::server::config::{Config, Secrets};
use psychoguard::server::{AppState, router};

/// PsychoGuard daemon serving the manipulation detector API.
#[derive(Parser)]
#[command(name = "psychoguardd")]
#[command(version = psychoguard::PKG_VERSION)]
#[command(about = "PsychoGuard manipulation analysis API")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding the configuration.
    #[arg(short, long, env = "PSYCHOGUARD_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }
    let secrets = Secrets::load()?;

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| PsychoGuardError::Configuration(format!("Invalid address: {e}")))?;

    let state = Arc::new(AppState::from_config(&config, &secrets)?);

    info!(
        version = %psychoguard::BUILD,
        built_at = psychoguard::BUILD.built_at,
        %addr,
        "psychoguardd starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
