//! Configuration module
//!
//! Server and destination-database settings, loaded from the process environment
//! (with `.env` support). Malformed optional values fall back to their defaults instead
//! of failing startup; only missing required database settings are errors.

use std::env;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 15;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Conventional PostgreSQL port, used whenever `DB_PORT` is missing or malformed.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Destination table written by the upload endpoint.
pub const DEFAULT_TABLE: &str = "iar_2025_monitoring";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub http_concurrency_limit: usize,
    pub environment: String,
}

/// How the connection to the destination is protected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SslPolicy {
    /// No transport encryption
    Disable,
    /// Encrypted, server certificate accepted without verification
    RequireTrusted,
    /// Encrypted, certificate and host name verified
    VerifyFull,
}

impl SslPolicy {
    pub fn from_flags(encrypt: bool, trust_server_certificate: bool) -> Self {
        match (encrypt, trust_server_certificate) {
            (false, _) => SslPolicy::Disable,
            (true, true) => SslPolicy::RequireTrusted,
            (true, false) => SslPolicy::VerifyFull,
        }
    }
}

/// Destination database settings
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    /// Named sub-instance from a `host\instance` server value
    pub instance_name: Option<String>,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub encrypt: bool,
    pub trust_server_certificate: bool,
    pub table: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

impl DatabaseConfig {
    pub fn ssl_policy(&self) -> SslPolicy {
        SslPolicy::from_flags(self.encrypt, self.trust_server_certificate)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let (host, instance_name) = parse_server(env::var("DB_SERVER").ok().as_deref());
        if host.is_empty() {
            return Err(anyhow::anyhow!("DB_SERVER must be set"));
        }

        let table = env::var("IAR_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        validate_table_name(&table)?;

        Ok(DatabaseConfig {
            host,
            instance_name,
            port: parse_port(env::var("DB_PORT").ok().as_deref()),
            database: env::var("DB_DATABASE")
                .map_err(|_| anyhow::anyhow!("DB_DATABASE must be set"))?,
            user: env::var("DB_USER").map_err(|_| anyhow::anyhow!("DB_USER must be set"))?,
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            encrypt: parse_flag(env::var("DB_ENCRYPT").ok().as_deref(), false),
            trust_server_certificate: parse_flag(
                env::var("DB_TRUST_SERVER_CERT").ok().as_deref(),
                true,
            ),
            table,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(MAX_CONNECTIONS)
                .max(1),
            timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
        })
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            environment,
        };

        Ok(Config {
            base,
            database: DatabaseConfig::from_env()?,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.base.max_upload_size_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn table(&self) -> &str {
        &self.database.table
    }
}

/// Parse a port value, falling back to [`DEFAULT_DB_PORT`] when it is missing, blank,
/// the literal `null`/`undefined`, or not a valid port number.
pub fn parse_port(value: Option<&str>) -> u16 {
    let Some(raw) = value else {
        return DEFAULT_DB_PORT;
    };
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() || normalized == "null" || normalized == "undefined" {
        return DEFAULT_DB_PORT;
    }
    normalized.parse().unwrap_or(DEFAULT_DB_PORT)
}

/// Split a server value into base host and optional named instance.
///
/// Only the first backslash splits; an empty instance part counts as absent.
pub fn parse_server(value: Option<&str>) -> (String, Option<String>) {
    let raw = value.unwrap_or_default().trim();
    match raw.split_once('\\') {
        None => (raw.to_string(), None),
        Some((host, instance)) => {
            let instance = instance.split('\\').next().unwrap_or_default();
            let instance = (!instance.is_empty()).then(|| instance.to_string());
            (host.to_string(), instance)
        }
    }
}

/// Boolean toggles are on only for the exact string `true`.
fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => v == "true",
        None => default,
    }
}

/// Reject anything that is not a plain (optionally schema-qualified) SQL identifier;
/// the table name is interpolated into the INSERT statement.
pub fn validate_table_name(table: &str) -> Result<(), anyhow::Error> {
    let parts: Vec<&str> = table.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "IAR_TABLE '{}' is not a valid table identifier",
            table
        ))
    }
}
