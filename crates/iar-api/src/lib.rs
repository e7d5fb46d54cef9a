//! IAR Uploader API Library
//!
//! This crate provides the HTTP handlers, error rendering and application setup for the
//! CSV upload service.

// Module declarations
mod handlers;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
