//! # Verolix
//!
//! Local-only health record demo with patient and doctor dashboards.
//!
//! This crate provides:
//! - A pseudo-session (login/registration with form validation only)
//! - A medical record store with search
//! - A patient profile store and a doctor-side patient lookup
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (User, MedicalRecord, PatientProfile, validation)
//! - `ports`: Trait definitions for external operations (key-value storage)
//! - `adapters`: Concrete implementations (SQLite, log sanitization)
//! - `application`: Session, record, profile and lookup services
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{MedicalRecord, PatientProfile, PatientSnapshot, RecordType, Role, User};

/// Result type for Verolix operations
pub type Result<T> = std::result::Result<T, VerolixError>;

/// Main error type for Verolix
#[derive(Debug, thiserror::Error)]
pub enum VerolixError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("{0}")]
    Validation(#[from] domain::ValidationError),

    #[error("No patient found with ID {0}")]
    PatientNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VerolixError {
    /// Whether the error is a user mistake the form can recover from.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::PatientNotFound(_))
    }
}
