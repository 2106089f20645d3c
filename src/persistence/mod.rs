//! Key-value persistence
//!
//! - `MemoryStore`: process-local, used by tests and throwaway sessions
//! - `JsonFileStore`: a small JSON document on disk, rewritten atomically
//!   (tmp file then rename) on every write
//!
//! Read failures never reach the game: a missing or corrupt file is logged
//! and treated as empty, so records fall back to their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::KeyValueStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk and in-memory layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub ints: BTreeMap<String, i64>,
    pub bools: BTreeMap<String, bool>,
}

impl StoreData {
    fn get_int(&self, key: &str) -> i64 {
        self.ints.get(key).copied().unwrap_or(0)
    }

    fn get_bool(&self, key: &str) -> bool {
        self.bools.get(key).copied().unwrap_or(false)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> i64 {
        self.data.get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.data.ints.insert(key.to_string(), value);
    }

    fn get_bool(&self, key: &str) -> bool {
        self.data.get_bool(key)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.data.bools.insert(key.to_string(), value);
    }
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if it can't be read
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match read_data(&path) {
            Ok(data) => {
                log::info!("Loaded store from {}", path.display());
                data
            }
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("No store at {}, starting fresh", path.display());
                StoreData::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable store: {err}");
                StoreData::default()
            }
        };
        Self { path, data }
    }

    /// Write the current contents to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.data)?;
        write_atomic(&self.path, text.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self) {
        if let Err(err) = self.flush() {
            log::warn!("Failed to save store: {err}");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> i64 {
        self.data.get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.data.ints.insert(key.to_string(), value);
        self.persist();
    }

    fn get_bool(&self, key: &str) -> bool {
        self.data.get_bool(key)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.data.bools.insert(key.to_string(), value);
        self.persist();
    }
}

fn read_data(path: &Path) -> Result<StoreData, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, bytes)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("store.json");
    path.with_file_name(format!("{file_name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("missing"), 0);
        assert!(!store.get_bool("missing"));
        store.set_int("score", 40);
        store.set_bool("flag", true);
        assert_eq!(store.get_int("score"), 40);
        assert!(store.get_bool("flag"));
    }

    #[test]
    fn test_file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("best"), 0);
        store.set_int("best", 120);
        store.set_bool("tutorial", true);
        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get_int("best"), 120);
        assert!(reopened.get_bool("tutorial"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("best"), 0);
        assert!(matches!(read_data(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("save.json");
        let mut store = JsonFileStore::open(&path);
        store.set_bool("tutorial", true);
        assert!(store.flush().is_ok());
        assert!(path.exists());
    }
}
