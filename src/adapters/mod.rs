//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite-backed key-value store
//! - `sanitize`: PII filtering for logs

pub mod sanitize;
pub mod sqlite;

// Re-export storage error for lib.rs
pub use sqlite::StorageError;
