//! Application layer: Use cases and services.
//!
//! Session, record, profile and lookup services over the key-value port,
//! bundled into `AppState`.

mod lookup;
mod persist;
mod profile;
mod records;
mod session;
mod state;

pub use lookup::{DoctorLookup, RECENT_PATIENTS_LIMIT};
pub use profile::ProfileStore;
pub use records::RecordStore;
pub use session::SessionManager;
pub use state::{AppState, Operation};
