//! Database access for the destination table.
//
// Shared, lazily-initialised connection pool
pub mod pool;
//
// Connectivity check and bulk insert
pub mod iar;
