//! Explicit application-state context handed to every view.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::sqlite::SqliteStore;
use crate::adapters::StorageError;
use crate::config::{AppConfig, MAX_LATENCY_SCALE};
use crate::ports::KeyValueStore;

use super::{DoctorLookup, ProfileStore, RecordStore, SessionManager};

/// A user action that goes through simulated network latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    UploadRecord,
    SaveProfile,
    FindPatient,
}

impl Operation {
    /// Unscaled delay before the operation takes effect.
    #[must_use]
    pub fn base_latency(&self) -> Duration {
        match self {
            Self::UploadRecord => Duration::from_millis(1500),
            Self::Login | Self::Register | Self::SaveProfile | Self::FindPatient => {
                Duration::from_millis(1000)
            }
        }
    }
}

/// All stores over one shared backend.
///
/// Created at startup, dropped at exit; views mutate state only through
/// these services.
pub struct AppState<S>
where
    S: KeyValueStore,
{
    pub sessions: SessionManager<S>,
    pub records: RecordStore<S>,
    pub profiles: ProfileStore<S>,
    pub lookup: DoctorLookup<S>,
    latency_scale: f64,
}

impl<S> AppState<S>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    /// Build every service over `storage`.
    pub fn new(storage: Arc<S>, latency_scale: f64) -> Self {
        Self {
            sessions: SessionManager::new(storage.clone()),
            records: RecordStore::new(storage.clone()),
            profiles: ProfileStore::new(storage.clone()),
            lookup: DoctorLookup::new(storage),
            latency_scale: latency_scale.max(0.0).min(MAX_LATENCY_SCALE),
        }
    }

    /// Delay to apply before `op` takes effect.
    #[must_use]
    pub fn latency(&self, op: Operation) -> Duration {
        op.base_latency().mul_f64(self.latency_scale)
    }
}

impl AppState<SqliteStore> {
    /// Open the configured SQLite database.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened.
    pub fn open(config: &AppConfig) -> Result<Self, StorageError> {
        let storage = Arc::new(SqliteStore::new(&config.db_path)?);
        tracing::info!("Opened storage");
        Ok(Self::new(storage, config.latency_scale))
    }

    /// Fresh in-memory state with no latency (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(SqliteStore::in_memory()?), 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credentials, Role};

    #[test]
    fn test_services_share_backend() {
        let state = AppState::in_memory().expect("Should create state");
        state
            .sessions
            .login(Role::Patient, &Credentials::new("jane@clinic.org", "secret"))
            .expect("Should log in");
        state.records.ensure_seeded().expect("Should seed");

        let snapshot = state.lookup.find_patient("PID-55555").expect("Should find");
        assert_eq!(snapshot.records.len(), 3);
        assert!(state.sessions.current().expect("Should read").is_some());
    }

    #[test]
    fn test_latency_scaling() {
        let storage = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let state = AppState::new(storage, 2.0);
        assert_eq!(state.latency(Operation::UploadRecord), Duration::from_secs(3));
        assert_eq!(
            AppState::in_memory()
                .expect("Should create state")
                .latency(Operation::Login),
            Duration::ZERO
        );
    }

    #[test]
    fn test_latency_scale_is_bounded() {
        let storage = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let login = Operation::Login.base_latency();

        let huge = AppState::new(storage.clone(), 1e30);
        assert_eq!(huge.latency(Operation::Login), login.mul_f64(MAX_LATENCY_SCALE));

        let nan = AppState::new(storage, f64::NAN);
        assert_eq!(nan.latency(Operation::Login), Duration::ZERO);
    }
}
