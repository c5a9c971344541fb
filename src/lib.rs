pub mod api;
pub mod config;
pub mod db;
pub mod email;
pub mod entities;
pub mod messages;
pub mod services;
pub mod state;
pub mod validation;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::Config;

pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dagbok={log_level},tower_http=warn")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(state::SharedState::new(config).await?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
