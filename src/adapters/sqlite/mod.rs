//! SQLite adapter: Implementation of `KeyValueStore`.
//!
//! Stands in for browser local storage: one `kv` table of string keys and
//! JSON string values, file-backed for the app and in-memory for tests.
//!
//! # Mutex Behavior
//!
//! The connection is protected by a `Mutex`. A poisoned mutex surfaces as
//! `StorageError::LockPoisoned` rather than a panic.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::ports::KeyValueStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// SQLite storage adapter.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;

        tracing::debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        tracing::debug!(key, "Removed value");
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, Self::Error> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv", [])?;
        tracing::warn!("Cleared all data from storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = SqliteStore::in_memory().expect("Should create db");

        assert!(store.get("verolix-user").expect("Should read").is_none());
        assert!(!store.contains("verolix-user").expect("Should check"));

        store.set("verolix-user", r#"{"id":"1"}"#).expect("Should write");
        assert_eq!(
            store.get("verolix-user").expect("Should read").as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert!(store.contains("verolix-user").expect("Should check"));
    }

    #[test]
    fn test_set_overwrites() {
        let store = SqliteStore::in_memory().expect("Should create db");
        store.set("k", "one").expect("Should write");
        store.set("k", "two").expect("Should write");
        assert_eq!(store.get("k").expect("Should read").as_deref(), Some("two"));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = SqliteStore::in_memory().expect("Should create db");
        store.set("a", "1").expect("Should write");
        store.set("b", "2").expect("Should write");

        store.remove("a").expect("Should remove");
        store.remove("missing").expect("Removing a missing key is fine");
        assert!(store.get("a").expect("Should read").is_none());

        store.clear_all().expect("Should clear");
        assert!(store.get("b").expect("Should read").is_none());
    }

    #[test]
    fn test_file_backed_persists_across_handles() {
        let path = std::env::temp_dir().join(format!(
            "verolix-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteStore::new(&path).expect("Should open");
            store.set("verolix-profile", "{}").expect("Should write");
        }
        let reopened = SqliteStore::new(&path).expect("Should reopen");
        assert_eq!(
            reopened.get("verolix-profile").expect("Should read").as_deref(),
            Some("{}")
        );

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
