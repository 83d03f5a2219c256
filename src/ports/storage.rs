//! Storage port: the key-value persistence substrate.
//!
//! Values are string-encoded JSON. The stores in `application` own the
//! encoding; backends only move strings.

/// Fixed keys of the persisted state layout.
pub mod keys {
    /// Current session (`User`).
    pub const SESSION: &str = "verolix-user";
    /// All medical records (`Vec<MedicalRecord>`).
    pub const RECORDS: &str = "verolix-records";
    /// Patient profile (`PatientProfile`).
    pub const PROFILE: &str = "verolix-profile";
    /// Doctor's recent lookups (`Vec<PatientSnapshot>`).
    pub const RECENT_PATIENTS: &str = "verolix-recent-patients";
}

/// Trait for local key-value storage.
///
/// All data is stored locally and never transmitted. Writes replace the
/// whole value; there is no transactional read-modify-write.
pub trait KeyValueStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value under `key`.
    ///
    /// # Returns
    /// `None` if the key has never been set or was removed.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;

    /// Check whether `key` holds a value.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn contains(&self, key: &str) -> Result<bool, Self::Error> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove every key.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
