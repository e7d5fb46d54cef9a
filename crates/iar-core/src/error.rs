//! Error types module
//!
//! All failures of an upload request are unified under [`AppError`]. Client input
//! problems (no file, empty CSV) map to 400, everything else to 500. Normalization never
//! produces an error: malformed cell values degrade to `None` instead.
//!
//! The `Database` variant carries a `sqlx::Error` when the `sqlx` feature is enabled.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as a missing file
    Debug,
    /// Recoverable issues such as an unreachable database
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("CSV has no rows")]
    EmptyCsv,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::NoFile => (400, "NO_FILE", false, LogLevel::Debug),
        AppError::EmptyCsv => (400, "EMPTY_CSV", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Csv(_) => (500, "CSV_ERROR", false, LogLevel::Warn),
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::NoFile => "NoFile",
            AppError::EmptyCsv => "EmptyCsv",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Csv(_) => "Csv",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Whether the request was rejected because of its own content (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&app_error_static_metadata(self).0)
    }

    /// The most specific message available for the underlying fault.
    ///
    /// Database errors report the driver's own message (e.g. `invalid input syntax for
    /// type date`) rather than the `Database error:` wrapper.
    pub fn fault_message(&self) -> String {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(SqlxError::Database(db)) => db.message().to_string(),
            AppError::Database(err) => err.to_string(),
            AppError::InternalWithSource { message, .. } => message.clone(),
            AppError::Internal(msg) | AppError::Csv(msg) | AppError::InvalidInput(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoFile => "No file uploaded".to_string(),
            AppError::EmptyCsv => "CSV has no rows".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Csv(ref msg) => msg.clone(),
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
