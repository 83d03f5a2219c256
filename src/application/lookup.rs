//! Doctor-side patient lookup and the recent-patients cache.
//!
//! Records and profile are global, so every matching id resolves to the
//! same data: the store holds a single mock patient.

use std::sync::Arc;

use crate::adapters::StorageError;
use crate::domain::{PatientId, PatientSnapshot, ValidationError};
use crate::ports::{keys, KeyValueStore};
use crate::VerolixError;

use super::persist;
use super::profile::ProfileStore;
use super::records::RecordStore;

/// Maximum entries kept in the recent-patients cache.
pub const RECENT_PATIENTS_LIMIT: usize = 5;

/// Service resolving patient ids for doctors.
pub struct DoctorLookup<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
    records: RecordStore<S>,
    profiles: ProfileStore<S>,
}

impl<S> DoctorLookup<S>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    /// Create a new lookup service.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            records: RecordStore::new(storage.clone()),
            profiles: ProfileStore::new(storage.clone()),
            storage,
        }
    }

    /// Resolve `raw` to a patient snapshot.
    ///
    /// Only ids with the `PID-` prefix resolve. A hit is pushed to the front
    /// of the recent-patients cache unless already present.
    ///
    /// # Errors
    /// - `EmptyPatientId` for blank input
    /// - `PatientNotFound` for anything without the prefix
    /// - storage errors
    pub fn find_patient(&self, raw: &str) -> Result<PatientSnapshot, VerolixError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyPatientId.into());
        }
        let Some(patient_id) = PatientId::parse(raw) else {
            tracing::info!("Patient lookup missed");
            return Err(VerolixError::PatientNotFound(raw.to_string()));
        };

        let records = self.records.list()?;
        let profile = self.profiles.saved()?;
        let snapshot = PatientSnapshot::compose(patient_id, records, profile.as_ref());

        let mut recent = self.recent()?;
        if remember(&mut recent, &snapshot) {
            persist::save_json(self.storage.as_ref(), keys::RECENT_PATIENTS, &recent)?;
        }

        tracing::info!(records = snapshot.records.len(), "Patient lookup succeeded");
        Ok(snapshot)
    }

    /// Recent lookups, most recent first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self) -> Result<Vec<PatientSnapshot>, VerolixError> {
        Ok(persist::load_json(self.storage.as_ref(), keys::RECENT_PATIENTS)?.unwrap_or_default())
    }
}

/// Front-insert `snapshot` unless its patient id is already cached.
///
/// Returns whether the cache changed.
fn remember(recent: &mut Vec<PatientSnapshot>, snapshot: &PatientSnapshot) -> bool {
    if recent.iter().any(|p| p.patient_id == snapshot.patient_id) {
        return false;
    }
    recent.insert(0, snapshot.clone());
    recent.truncate(RECENT_PATIENTS_LIMIT);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;

    fn create_test_lookup() -> (DoctorLookup<SqliteStore>, RecordStore<SqliteStore>) {
        let storage = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        (
            DoctorLookup::new(storage.clone()),
            RecordStore::new(storage),
        )
    }

    fn ids(recent: &[PatientSnapshot]) -> Vec<String> {
        recent.iter().map(|p| p.patient_id.to_string()).collect()
    }

    #[test]
    fn test_blank_id_is_validation_error() {
        let (lookup, _) = create_test_lookup();
        let err = lookup.find_patient("   ").expect_err("Should fail");
        assert!(matches!(
            err,
            VerolixError::Validation(ValidationError::EmptyPatientId)
        ));
    }

    #[test]
    fn test_unprefixed_id_not_found() {
        let (lookup, _) = create_test_lookup();
        let err = lookup.find_patient("12345").expect_err("Should fail");
        assert_eq!(err.to_string(), "No patient found with ID 12345");
        assert!(lookup.recent().expect("Should read").is_empty());
    }

    #[test]
    fn test_any_prefixed_id_sees_global_records() {
        let (lookup, records) = create_test_lookup();
        records.ensure_seeded().expect("Should seed");

        let a = lookup.find_patient("PID-11111").expect("Should find");
        let b = lookup.find_patient("PID-22222").expect("Should find");
        assert_eq!(a.records, b.records);
        assert_eq!(a.records.len(), 3);
        assert_eq!(b.name, "Patient 22222");
    }

    #[test]
    fn test_repeat_lookup_not_duplicated() {
        let (lookup, _) = create_test_lookup();
        lookup.find_patient("PID-10001").expect("Should find");
        lookup.find_patient("PID-10002").expect("Should find");
        lookup.find_patient("PID-10001").expect("Should find");

        let recent = lookup.recent().expect("Should read");
        assert_eq!(ids(&recent), ["PID-10002", "PID-10001"]);
    }

    #[test]
    fn test_cache_capped_most_recent_first() {
        let (lookup, _) = create_test_lookup();
        for n in 1..=7 {
            lookup
                .find_patient(&format!("PID-1000{n}"))
                .expect("Should find");
        }

        let recent = lookup.recent().expect("Should read");
        assert_eq!(
            ids(&recent),
            ["PID-10007", "PID-10006", "PID-10005", "PID-10004", "PID-10003"]
        );
    }
}
