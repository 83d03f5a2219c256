//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application services and the persistence backend.

mod storage;

pub use storage::{keys, KeyValueStore};
