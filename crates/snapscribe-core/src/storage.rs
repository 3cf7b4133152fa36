//! Key-value storage adapters backing the auth and session stores.
//!
//! The adapter contract is synchronous; the stores layer async semantics
//! (simulated latency, per-collection mutual exclusion) on top of it.

use log::{debug, info};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable key-value storage of JSON values under string keys.
///
/// Implementations must round-trip any JSON value losslessly; timestamps are
/// persisted as ISO-8601 strings, never as a native date representation.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    /// Remove the value stored under `key`. Missing keys are a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and deserialize the value under `key`.
pub(crate) fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write `value` under `key`.
pub(crate) fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    store.set(key, serde_json::to_value(value)?)
}

/// In-memory store, the injectable fake for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` file per key under a root
/// directory.
pub struct JsonFileStore {
    /// Root directory for entry files.
    root: PathBuf,
    /// Serialize write access to entry files.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a file store under the given root, creating it if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized JSON file store (root={})", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Build the entry file path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.entry_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err)),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let serialized = serde_json::to_string(&value)?;
        debug!("writing entry (key={key}, bytes={})", serialized.len());
        fs::write(self.entry_path(key), serialized)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}
