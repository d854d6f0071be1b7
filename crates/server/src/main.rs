// crates/server/src/main.rs
//! Blogsnap server binary.
//!
//! Reads configuration from the environment, wires the external scraper
//! command behind the job system, and serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use blogsnap_core::CommandScraper;
use blogsnap_server::delivery::ResultDelivery;
use blogsnap_server::{create_app, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = Config::from_env();

    let scraper = CommandScraper::new(config.scraper.command.clone())
        .with_args(config.scraper.args.clone())
        .with_timeout(config.scraper.timeout_secs);
    let delivery = ResultDelivery::new(config.callback.clone());

    let state = AppState::new(Arc::new(scraper), delivery);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        port = config.port,
        scraper = %config.scraper.command,
        callback_configured = config.callback.is_some(),
        "blogsnap server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
