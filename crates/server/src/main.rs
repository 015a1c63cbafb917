//! searchgate server entry point.
//!
//! Boots the HTTP search front. Logs are JSON on stderr, filtered by `RUST_LOG`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use searchgate_client::{HttpConfig, HttpTransport};
use searchgate_core::AppConfig;

mod error;
mod middleware;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let transport = HttpTransport::new(HttpConfig { user_agent: config.user_agent.clone(), timeout: config.timeout() })?;

    let bind_addr = config.bind_addr.clone();
    tracing::info!(endpoints = ?config.endpoints, %bind_addr, "starting searchgate");

    let app = routes::router(AppState::new(config, Arc::new(transport)));
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("searchgate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
