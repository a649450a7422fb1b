//! HTTP server for the shift rotation scheduler.
//!
//! Reads the configuration directory from `SHIFT_ROTA_CONFIG` (default
//! `./config/noc`) and listens on `SHIFT_ROTA_ADDR` (default
//! `127.0.0.1:3000`). Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_rota::api::{AppState, create_router};
use shift_rota::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/noc";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shift_rota=info")),
        )
        .init();

    let config_dir =
        std::env::var("SHIFT_ROTA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = std::env::var("SHIFT_ROTA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(addr = %addr, config_dir = %config_dir, "Shift rota server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
