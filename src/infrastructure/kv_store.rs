use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::domain::errors::DomainError;

/// Key holding the session's "logged in" flag.
pub const LOGIN_FLAG_KEY: &str = "isLoggedIn";
/// Key holding the serialized order collection.
pub const ORDERS_KEY: &str = "orders";

/// Client-local key-value state, read synchronously.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
}

/// Store backed by a single JSON object file.
///
/// The file is re-read on every lookup so each page view observes the latest
/// state. String values are returned as-is; any other JSON value is returned
/// as its JSON text, so `"orders": [...]` and `"orders": "[...]"` are
/// equivalent. A missing file behaves like an empty store.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>, DomainError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::Storage(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| DomainError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let Some(document) = self.read_document()? else {
            return Ok(None);
        };
        Ok(document.get(key).and_then(value_text))
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// In-process store, used for seeded state and tests.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.into(), value.into());
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn store_with(contents: &str) -> (tempfile::NamedTempFile, FileKeyValueStore) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        let store = FileKeyValueStore::new(file.path());
        (file, store)
    }

    #[test]
    fn missing_file_behaves_like_empty_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileKeyValueStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get(ORDERS_KEY).expect("no error"), None);
    }

    #[test]
    fn string_values_are_returned_verbatim() {
        let (_file, store) = store_with(r#"{"isLoggedIn": "true", "orders": "[]"}"#);
        assert_eq!(store.get(LOGIN_FLAG_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(ORDERS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn structured_values_are_returned_as_json_text() {
        let (_file, store) = store_with(r#"{"isLoggedIn": true, "orders": [{"id": 1}]}"#);
        assert_eq!(store.get(LOGIN_FLAG_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(ORDERS_KEY).unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn null_and_absent_keys_read_as_none() {
        let (_file, store) = store_with(r#"{"orders": null}"#);
        assert_eq!(store.get(ORDERS_KEY).unwrap(), None);
        assert_eq!(store.get(LOGIN_FLAG_KEY).unwrap(), None);
    }

    #[test]
    fn non_object_document_is_a_storage_error() {
        let (_file, store) = store_with("not json at all");
        assert!(matches!(store.get(ORDERS_KEY), Err(DomainError::Storage(_))));
    }

    #[test]
    fn memory_store_returns_inserted_values() {
        let store = MemoryKeyValueStore::with_entries([(LOGIN_FLAG_KEY, "true")]);
        store.insert(ORDERS_KEY, "[]");
        assert_eq!(store.get(LOGIN_FLAG_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(ORDERS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("missing").unwrap(), None);
    }
}
