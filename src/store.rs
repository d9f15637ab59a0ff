//! Key-value persistence for calculator inputs
//!
//! Pages save their raw form inputs as JSON under a page-chosen key. The
//! store is injected by the caller; projections never read or write it.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("store contains invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store file {0} does not hold a JSON object")]
    NotAnObject(PathBuf),
}

/// JSON key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-process store, lost on drop
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text)? {
                Value::Object(map) => map,
                _ => return Err(StoreError::NotAnObject(path)),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    /// Write the updated object to a sibling temp file and rename it over
    /// the store; memory is only updated once the rename succeeds
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut updated = self.entries.clone();
        updated.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&updated)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io { path: self.path.clone(), source });
        }

        self.entries = updated;
        Ok(())
    }
}

/// Save raw inputs under `key`
pub fn save_input<S, T>(store: &mut S, key: &str, input: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    store.set(key, serde_json::to_value(input)?)
}

/// Load inputs saved under `key`, if any
pub fn load_input<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
