//! Data models for the application
//!
//! `iar` holds the destination record shape, `preview` the client-facing preview of a
//! parsed file, and `status` the JSON bodies exchanged with the HTTP API.

mod iar;
mod preview;
mod status;

pub use iar::*;
pub use preview::*;
pub use status::*;
