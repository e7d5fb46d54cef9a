//! Database setup

use iar_core::Config;
use iar_db::SharedPool;
use std::sync::Arc;

/// Create the shared destination handle and attempt a first connect.
///
/// An unreachable database does not stop startup: the handle stays empty and the next
/// request that needs it connects again.
pub async fn setup_database(config: &Config) -> Arc<SharedPool> {
    let pool = Arc::new(SharedPool::new(&config.database));

    match pool.get().await {
        Ok(_) => tracing::info!("Database reachable at startup"),
        Err(e) => tracing::warn!(
            error = %e,
            "Database unavailable at startup; connection will be retried on first use"
        ),
    }

    pool
}
