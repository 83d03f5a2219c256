//! Record store: the ordered list of medical records.
//!
//! One array under one key, shared by every session. Insertion order is
//! upload order; records are only ever appended.

use std::sync::Arc;

use crate::adapters::StorageError;
use crate::domain::{record, MedicalRecord, RecordDraft};
use crate::ports::{keys, KeyValueStore};
use crate::VerolixError;

use super::persist;

/// Service for listing, adding and searching records.
pub struct RecordStore<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
}

impl<S> RecordStore<S>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    /// Create a new record store.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// All records in upload order; empty if none were ever stored.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn list(&self) -> Result<Vec<MedicalRecord>, VerolixError> {
        Ok(persist::load_json(self.storage.as_ref(), keys::RECORDS)?.unwrap_or_default())
    }

    /// Seed the sample records if nothing has been stored yet.
    ///
    /// Called on the first patient dashboard visit.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn ensure_seeded(&self) -> Result<Vec<MedicalRecord>, VerolixError> {
        if let Some(existing) = persist::load_json(self.storage.as_ref(), keys::RECORDS)? {
            return Ok(existing);
        }

        let samples = record::sample_records();
        persist::save_json(self.storage.as_ref(), keys::RECORDS, &samples)?;
        tracing::info!(count = samples.len(), "Seeded sample records");
        Ok(samples)
    }

    /// Validate an upload and append it.
    ///
    /// # Errors
    /// Returns `MissingRecordFields` for an incomplete draft, or a storage
    /// error.
    pub fn add(&self, draft: RecordDraft) -> Result<MedicalRecord, VerolixError> {
        let new_record = draft.into_record()?;

        let mut records = self.list()?;
        records.push(new_record.clone());
        persist::save_json(self.storage.as_ref(), keys::RECORDS, &records)?;

        tracing::info!(kind = %new_record.kind, total = records.len(), "Record uploaded");
        Ok(new_record)
    }

    /// Records whose searchable fields contain `term`, case-insensitively.
    ///
    /// A blank term returns every record. Order is preserved.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn search(&self, term: &str) -> Result<Vec<MedicalRecord>, VerolixError> {
        Ok(filter(self.list()?, term))
    }

    /// Number of stored records.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count(&self) -> Result<usize, VerolixError> {
        Ok(self.list()?.len())
    }
}

/// Keep records matching `term`, preserving order.
#[must_use]
fn filter(records: Vec<MedicalRecord>, term: &str) -> Vec<MedicalRecord> {
    records.into_iter().filter(|r| r.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;
    use crate::domain::{RecordType, ValidationError};

    fn create_test_store() -> RecordStore<SqliteStore> {
        let storage = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        RecordStore::new(storage)
    }

    fn upload(title: &str) -> RecordDraft {
        RecordDraft {
            kind: RecordType::Prescription,
            title: title.to_string(),
            date: "2024-05-01".to_string(),
            doctor: "Dr. Gregory House".to_string(),
            details: String::new(),
            file_name: Some("scan.pdf".to_string()),
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let store = create_test_store();
        assert!(store.list().expect("Should list").is_empty());
        assert_eq!(store.count().expect("Should count"), 0);
    }

    #[test]
    fn test_seed_only_once() {
        let store = create_test_store();
        assert_eq!(store.ensure_seeded().expect("Should seed").len(), 3);

        store.add(upload("Extra")).expect("Should add");
        let again = store.ensure_seeded().expect("Should not reseed");
        assert_eq!(again.len(), 4);
    }

    #[test]
    fn test_add_appends_last() {
        let store = create_test_store();
        store.ensure_seeded().expect("Should seed");
        let before = store.count().expect("Should count");

        let added = store.add(upload("MRI Referral")).expect("Should add");
        let records = store.list().expect("Should list");

        assert_eq!(records.len(), before + 1);
        assert_eq!(records.last(), Some(&added));
    }

    #[test]
    fn test_add_rejects_incomplete_draft() {
        let store = create_test_store();
        let mut draft = upload("No file");
        draft.file_name = None;

        let err = store.add(draft).expect_err("Should fail");
        assert!(matches!(
            err,
            VerolixError::Validation(ValidationError::MissingRecordFields)
        ));
        assert_eq!(store.count().expect("Should count"), 0);
    }

    #[test]
    fn test_search() {
        let store = create_test_store();
        store.ensure_seeded().expect("Should seed");

        let all = store.list().expect("Should list");
        assert_eq!(store.search("").expect("Should search"), all);

        let johnson = store.search("johnson").expect("Should search");
        let titles: Vec<&str> = johnson.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Amoxicillin Prescription", "Annual Checkup Notes"]);

        assert!(store.search("oncology").expect("Should search").is_empty());
    }
}
