//! Binary crate for the `mapweather` proxy server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading configuration and failing hard when secrets are missing
//! - Serving the two pass-through API endpoints

use anyhow::Context;
use clap::Parser;
use mapweather_core::{Config, OpenWeatherClient};
use mapweather_proxy::app;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Key-hiding proxy between the map client and OpenWeather.
#[derive(Debug, Parser)]
#[command(name = "mapweather-proxy", version, about)]
struct Args {
    /// Listen address, e.g. "127.0.0.1:3000". Overrides the config
    /// file.
    #[arg(long)]
    bind: Option<String>,

    /// Path to an explicit config file instead of the platform config
    /// directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Both secrets are checked up front: a proxy without the provider
    // key cannot serve anything, and a deployment without the map
    // token would only fail later in the browser.
    let api_key = config.require_api_key()?.to_owned();
    config.require_map_token()?;

    let addr = args
        .bind
        .or(config.listen_addr)
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());

    let client = OpenWeatherClient::new(api_key);
    let app = app::router(client);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Proxy server running on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("Proxy server exited with an error")?;

    Ok(())
}
