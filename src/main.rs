//! PayTrack HTTP server.
//!
//! Loads configuration from `PAYTRACK_CONFIG_DIR` (default `./config`),
//! seeds an in-memory record store with the configured roster and serves
//! the API on the configured bind address.

use std::error::Error;

use paytrack_engine::api::{AppState, create_router};
use paytrack_engine::config::ConfigLoader;
use tracing::{error, info};

const CONFIG_DIR_ENV: &str = "PAYTRACK_CONFIG_DIR";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting PayTrack v{}", env!("CARGO_PKG_VERSION"));

    let config_dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "./config".to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return Err(err.into());
        }
    };

    let bind_address = config.server().bind_address.clone();
    let state = AppState::in_memory(&config);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
