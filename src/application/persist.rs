//! JSON encoding on top of the raw key-value port.

use serde::{de::DeserializeOwned, Serialize};

use crate::adapters::StorageError;
use crate::ports::KeyValueStore;
use crate::VerolixError;

/// Read and decode the value under `key`.
///
/// A value that no longer decodes (schema drift, manual edits) is treated
/// as absent.
pub(crate) fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, VerolixError>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
    T: DeserializeOwned,
{
    let Some(raw) = store
        .get(key)
        .map_err(|e| VerolixError::Storage(e.into()))?
    else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring undecodable stored value");
            Ok(None)
        }
    }
}

/// Encode `value` and write it under `key`.
pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), VerolixError>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store
        .set(key, &raw)
        .map_err(|e| VerolixError::Storage(e.into()))
}

/// Remove `key`.
pub(crate) fn remove<S>(store: &S, key: &str) -> Result<(), VerolixError>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    store
        .remove(key)
        .map_err(|e| VerolixError::Storage(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let store = SqliteStore::in_memory().expect("Should create db");
        store.set("verolix-records", "{not json").expect("Should write");
        let loaded: Option<Vec<String>> =
            load_json(&store, "verolix-records").expect("Should not fail");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let store = SqliteStore::in_memory().expect("Should create db");
        save_json(&store, "k", &vec!["a", "b"]).expect("Should save");
        let loaded: Option<Vec<String>> = load_json(&store, "k").expect("Should load");
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_unencodable_value_is_serialization_error() {
        let store = SqliteStore::in_memory().expect("Should create db");
        let value = std::collections::BTreeMap::from([(vec![1u8], 1u8)]);

        let result = save_json(&store, "k", &value);
        assert!(matches!(result, Err(VerolixError::Serialization(_))));
        assert_eq!(store.get("k").expect("Should read"), None);
    }
}
