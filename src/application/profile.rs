//! Profile store: the single patient profile.

use std::sync::Arc;

use crate::adapters::StorageError;
use crate::domain::{PatientProfile, User};
use crate::ports::{keys, KeyValueStore};
use crate::VerolixError;

use super::persist;

/// Service for loading and saving the patient profile.
pub struct ProfileStore<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
}

impl<S> ProfileStore<S>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    /// Create a new profile store.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// The persisted profile, or defaults derived from `user`.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn load(&self, user: &User) -> Result<PatientProfile, VerolixError> {
        Ok(self
            .saved()?
            .unwrap_or_else(|| PatientProfile::for_user(user)))
    }

    /// The persisted profile, if one was ever saved.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn saved(&self) -> Result<Option<PatientProfile>, VerolixError> {
        persist::load_json(self.storage.as_ref(), keys::PROFILE)
    }

    /// Overwrite the stored profile.
    ///
    /// The email is pinned to the one already on file so the read-only
    /// field cannot drift.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn save(&self, user: &User, profile: PatientProfile) -> Result<PatientProfile, VerolixError> {
        let email = self.load(user)?.email;
        let profile = PatientProfile { email, ..profile };

        persist::save_json(self.storage.as_ref(), keys::PROFILE, &profile)?;
        tracing::info!("Profile updated");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;
    use crate::domain::Role;

    fn create_test_store() -> ProfileStore<SqliteStore> {
        let storage = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        ProfileStore::new(storage)
    }

    fn patient() -> User {
        User::new("jane@clinic.org", "Jane", Role::Patient)
    }

    #[test]
    fn test_load_defaults_from_session() {
        let store = create_test_store();
        let profile = store.load(&patient()).expect("Should load");
        assert_eq!(profile.full_name, "Jane");
        assert_eq!(profile.email, "jane@clinic.org");
        assert!(store.saved().expect("Should read").is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = create_test_store();
        let user = patient();
        let profile = PatientProfile {
            phone: "555-0100".to_string(),
            date_of_birth: "1990-02-01".to_string(),
            allergies: "Penicillin".to_string(),
            ..store.load(&user).expect("Should load")
        };

        store.save(&user, profile.clone()).expect("Should save");
        assert_eq!(store.load(&user).expect("Should load"), profile);
    }

    #[test]
    fn test_save_keeps_email() {
        let store = create_test_store();
        let user = patient();
        let tampered = PatientProfile {
            email: "other@elsewhere.com".to_string(),
            ..PatientProfile::for_user(&user)
        };

        let saved = store.save(&user, tampered).expect("Should save");
        assert_eq!(saved.email, "jane@clinic.org");
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let store = create_test_store();
        let user = patient();
        let first = PatientProfile {
            gender: "female".to_string(),
            ..PatientProfile::for_user(&user)
        };
        store.save(&user, first).expect("Should save");

        let second = PatientProfile::for_user(&user);
        store.save(&user, second).expect("Should save");
        assert!(store.load(&user).expect("Should load").gender.is_empty());
    }
}
