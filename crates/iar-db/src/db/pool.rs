//! Process-wide connection pool to the destination database.
//!
//! The pool is created on first use and then reused for the lifetime of the process.
//! A failed connect leaves the handle empty, so the next caller tries again instead of
//! receiving a cached failure.

use iar_core::{DatabaseConfig, SslPolicy};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::OnceCell;

const APPLICATION_NAME: &str = "iar-uploader";

/// Build connection options from the destination settings.
///
/// PostgreSQL has no named instances; a `host\instance` value keeps only the host for
/// routing and reports the instance name as the session's `application_name`.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let ssl_mode = match config.ssl_policy() {
        SslPolicy::Disable => PgSslMode::Disable,
        SslPolicy::RequireTrusted => PgSslMode::Require,
        SslPolicy::VerifyFull => PgSslMode::VerifyFull,
    };

    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password)
        .ssl_mode(ssl_mode)
        .application_name(
            config
                .instance_name
                .as_deref()
                .unwrap_or(APPLICATION_NAME),
        )
}

/// Lazily-initialised, shared connection pool.
pub struct SharedPool {
    options: PgConnectOptions,
    max_connections: u32,
    timeout: Duration,
    cell: OnceCell<PgPool>,
}

impl SharedPool {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: connect_options(config),
            max_connections: config.max_connections,
            timeout: Duration::from_secs(config.timeout_seconds),
            cell: OnceCell::new(),
        }
    }

    /// Return the pool, connecting first if no connect has succeeded yet.
    ///
    /// Concurrent first callers wait on the same connect attempt.
    pub async fn get(&self) -> Result<&PgPool, sqlx::Error> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!(
                    host = self.options.get_host(),
                    port = self.options.get_port(),
                    database = self.options.get_database().unwrap_or_default(),
                    "Connecting to database..."
                );

                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(self.timeout)
                    .idle_timeout(Duration::from_secs(600))
                    .max_lifetime(Duration::from_secs(1800))
                    .connect_with(self.options.clone())
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Database connection failed; will retry on next use");
                        e
                    })?;

                tracing::info!(
                    max_connections = self.max_connections,
                    "Database connected successfully"
                );
                Ok::<PgPool, sqlx::Error>(pool)
            })
            .await
    }

    /// Whether a connect has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".to_string(),
            instance_name: None,
            port: 6432,
            database: "procurement".to_string(),
            user: "uploader".to_string(),
            password: "secret".to_string(),
            encrypt: false,
            trust_server_certificate: true,
            table: "iar_2025_monitoring".to_string(),
            max_connections: 2,
            timeout_seconds: 1,
        }
    }

    #[test]
    fn test_connect_options_from_config() {
        let options = connect_options(&config());
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_database(), Some("procurement"));
        assert_eq!(options.get_username(), "uploader");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
        assert_eq!(options.get_application_name(), Some(APPLICATION_NAME));
    }

    #[test]
    fn test_connect_options_tls_and_instance() {
        let mut cfg = config();
        cfg.encrypt = true;
        cfg.instance_name = Some("REPORTING".to_string());
        let options = connect_options(&cfg);
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
        assert_eq!(options.get_application_name(), Some("REPORTING"));

        cfg.trust_server_certificate = false;
        let options = connect_options(&cfg);
        assert!(matches!(options.get_ssl_mode(), PgSslMode::VerifyFull));
    }

    #[tokio::test]
    async fn test_failed_connect_is_not_cached() {
        let mut cfg = config();
        // Nothing listens on port 1 on loopback.
        cfg.host = "127.0.0.1".to_string();
        cfg.port = 1;
        let shared = SharedPool::new(&cfg);

        assert!(shared.get().await.is_err());
        assert!(!shared.is_initialized());
        assert!(shared.get().await.is_err());
        assert!(!shared.is_initialized());
    }
}
