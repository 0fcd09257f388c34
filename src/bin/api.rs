//! Querysplit API Server
//!
//! Run with: cargo run --bin querysplit-api
//!
//! # Configuration
//!
//! Reads the config file named by `QUERYSPLIT_CONFIG`, or searches the
//! default locations. Environment variables override file settings:
//! - `QUERYSPLIT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `QUERYSPLIT_API_PORT`: Port to listen on (default: 8085)
//! - `QUERYSPLIT_MAX_CHUNK_COUNT`: Chunk-count cap (default: 50)
//! - `QUERYSPLIT_LOG_LEVEL`, `QUERYSPLIT_LOG_FORMAT`
//! - `RUST_LOG`: Log filter, overrides the configured level

use anyhow::Context;
use querysplit::api::{serve, AppState};
use querysplit::config::Config;
use querysplit::logging::init_tracing;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("QUERYSPLIT_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };

    init_tracing(&config.logging).context("Failed to initialise logging")?;

    tracing::info!("Starting Querysplit API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Max chunk count: {}", config.split.max_chunk_count);

    let state = AppState::new(config.split.chunker(), config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Querysplit API server stopped");
    Ok(())
}
