//! IAR Uploader Core Library
//!
//! This crate provides the domain models, CSV parsing, field normalization, error types
//! and configuration shared by the API server, the HTTP client and the CLI.

pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod normalize;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DatabaseConfig, SslPolicy};
pub use crate::csv::{parse_csv, parse_csv_bytes, ParsedCsv, ParsedRow};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    CsvPreview, DbStatusResponse, NormalizedRecord, PreviewState, UploadResponse,
    DESTINATION_COLUMNS,
};
pub use normalize::{clean_amount, clean_date, clean_text, non_blank};
