//! IAR Uploader Database Layer
//!
//! This crate owns the process-wide connection handle to the destination database and the
//! repository that performs the connectivity check and the bulk insert.

// Module declarations
pub mod db;

// Re-exports
pub use db::iar::{IarRepository, PgIarRepository, MAX_ROWS_PER_STATEMENT};
pub use db::pool::{connect_options, SharedPool};
