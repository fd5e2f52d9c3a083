//! Key-value storage interface
//!
//! Everything the app persists between sessions goes through
//! [`KeyValueStore`]: string keys, JSON-encoded string values. The numeric
//! core never touches it. [`FileStore`] keeps one file per key; [`MemoryStore`]
//! backs tests and throwaway sessions.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use super::file_io::{read_text, write_text_atomic};
use crate::error::{CalcError, CalcResult};

/// String-keyed storage of string values
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CalcResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CalcResult<()>;
    fn remove(&self, key: &str) -> CalcResult<()>;
}

/// Decode a JSON value, `None` when the key is absent or blank
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CalcResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| CalcError::Storage(format!("Malformed value under '{}': {}", key, e)))
}

/// Decode a JSON array; absent, blank and `null` values read as empty
pub fn get_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CalcResult<Vec<T>> {
    Ok(get_json(store, key)?.unwrap_or_default())
}

pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> CalcResult<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

fn validate_key(key: &str) -> CalcResult<()> {
    if key.is_empty() {
        return Err(CalcError::Storage("Storage key cannot be empty".into()));
    }
    Ok(())
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> CalcResult<Self> {
        fs::create_dir_all(&dir).map_err(|e| {
            CalcError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// File backing `key`; bytes outside `[A-Za-z0-9_-]` are percent-encoded
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                name.push(byte as char);
            } else {
                let _ = write!(name, "%{:02X}", byte);
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        validate_key(key)?;
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> CalcResult<()> {
        validate_key(key)?;
        write_text_atomic(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> CalcResult<()> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CalcError::Storage(format!("Failed to remove '{}': {}", key, e))),
        }
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| CalcError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CalcResult<()> {
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| CalcError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CalcResult<()> {
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| CalcError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", "[\"AAPL\"]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[\"AAPL\"]"));

        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));

        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
        // Removing twice is fine
        store.remove("favorites").unwrap();

        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data")).unwrap();
        exercise(&store);
    }

    #[test]
    fn test_file_store_keys_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf()).unwrap();

        assert_ne!(store.path_for("a:b"), store.path_for("a_b"));
        assert!(store.path_for("../escape").starts_with(temp_dir.path()));

        store.set("a:b", "1").unwrap();
        store.set("a_b", "2").unwrap();
        assert_eq!(store.get("a:b").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_collections_tolerate_missing_and_blank() {
        let store = MemoryStore::new();
        let empty: Vec<String> = get_collection(&store, "users").unwrap();
        assert!(empty.is_empty());

        store.set("users", "").unwrap();
        let empty: Vec<String> = get_collection(&store, "users").unwrap();
        assert!(empty.is_empty());

        store.set("users", "null").unwrap();
        let empty: Vec<String> = get_collection(&store, "users").unwrap();
        assert!(empty.is_empty());

        set_json(&store, "users", &vec!["a", "b"]).unwrap();
        let loaded: Vec<String> = get_collection(&store, "users").unwrap();
        assert_eq!(loaded, vec!["a", "b"]);

        store.set("users", "{broken").unwrap();
        assert!(get_collection::<String>(&store, "users").is_err());
    }
}
