//! Domain layer: Core types and rules.
//!
//! Pure types with no I/O. Everything that gets persisted is serde
//! serializable with the camelCase field names of the stored JSON.

pub mod bmi;
pub mod contact;
mod ids;
mod patient;
mod profile;
pub mod record;
mod session;
mod validation;

pub use bmi::{BmiCategory, BmiReading};
pub use contact::{ContactErrors, ContactMessage};
pub use patient::{PatientSnapshot, ProfileSummary};
pub use profile::{PatientProfile, ProfileField};
pub use record::{MedicalRecord, RecordDraft, RecordType};
pub use session::{PatientId, Role, User, PATIENT_ID_PREFIX};
pub use validation::{
    is_valid_email, Credentials, Registration, ValidationError, MIN_NAME_LEN, MIN_PASSWORD_LEN,
};
