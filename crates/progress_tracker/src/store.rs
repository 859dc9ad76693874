//! Key-Value Store
//!
//! Abstract string storage the tracker persists its records into, the desktop
//! analog of per-origin browser local storage. Two backends:
//! - `MemoryStore`: HashMap, for tests and throwaway sessions
//! - `FileStore`: one JSON file per key inside a data directory

use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage key for the quiz answer map
pub const ANSWERS_KEY: &str = "maui-tutorial-progress";

/// Storage key for the gamification record
pub const GAMIFICATION_KEY: &str = "maui-tutorial-gamification";

/// Get/set capability injected into the tracker
pub trait KeyValueStore {
    /// Read the raw value for `key`, `None` when absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write the raw value for `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that keeps its current contents but refuses every write,
    /// standing in for disabled storage or an exceeded quota.
    pub fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    /// Raw value without going through the trait (test helper)
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly(key.to_string()));
        }
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Directory-backed store: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory: `<data_local_dir>/tutorial-progress`
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("tutorial-progress")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Anything outside `[A-Za-z0-9._-]` becomes `_`
    /// so a key can never leave the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_error(&path, e))
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
