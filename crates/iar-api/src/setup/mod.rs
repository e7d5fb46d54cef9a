//! Application setup and initialization
//!
//! Everything `main` needs before serving: telemetry, the destination handle, state and
//! the router.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Result;
use iar_core::Config;
use iar_db::PgIarRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = config.environment(),
        table = config.table(),
        "Configuration loaded"
    );

    let pool = database::setup_database(&config).await;
    let repository = Arc::new(PgIarRepository::new(pool, config.table()));
    let state = Arc::new(AppState::new(config.clone(), repository));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
