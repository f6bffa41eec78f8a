//! Save/load of session progress
//!
//! Progress is a tiny JSON envelope holding only the counters that survive
//! an app restart (level and lives), never live entity collections. The
//! backend is pluggable; missing data reads back as `None` and malformed
//! data surfaces as an error without touching the in-memory session.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Session counters that survive an app restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub lives: u32,
}

/// Persistence failure surfaced to the caller
#[derive(Debug)]
pub enum StoreError {
    /// The backend could not be read or written
    Backend(String),
    /// Stored data did not parse as progress
    Malformed(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "storage backend error: {msg}"),
            StoreError::Malformed(err) => write!(f, "malformed saved data: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Abstract string key-value store
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a base directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(self.path_for(key), value).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }
}

/// Progress persistence over any backend
pub struct ProgressStore<B> {
    backend: B,
}

impl<B: StorageBackend> ProgressStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn save(&mut self, key: &str, progress: Progress) -> Result<(), StoreError> {
        let json = serde_json::to_string(&progress).map_err(StoreError::Malformed)?;
        self.backend.set(key, &json)?;
        log::info!(
            "saved progress for {key}: level {}, {} lives",
            progress.level,
            progress.lives
        );
        Ok(())
    }

    /// Missing data is `Ok(None)`. Malformed data is an error the caller
    /// surfaces without losing the running session.
    pub fn load(&self, key: &str) -> Result<Option<Progress>, StoreError> {
        let Some(json) = self.backend.get(key)? else {
            return Ok(None);
        };
        let progress = serde_json::from_str(&json).map_err(StoreError::Malformed)?;
        Ok(Some(progress))
    }

    pub fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_memory() {
        let mut store = ProgressStore::new(MemoryStore::default());
        let progress = Progress { level: 4, lives: 2 };
        store.save("platformer", progress).unwrap();
        assert_eq!(store.load("platformer").unwrap(), Some(progress));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = ProgressStore::new(MemoryStore::default());
        assert_eq!(store.load("platformer").unwrap(), None);
    }

    #[test]
    fn malformed_data_is_an_error_not_a_panic() {
        let mut backend = MemoryStore::default();
        backend.set("platformer", "{\"level\": \"nine\"}").unwrap();
        let store = ProgressStore::new(backend);
        match store.load("platformer") {
            Err(StoreError::Malformed(_)) => {}
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn clear_removes_the_entry() {
        let mut store = ProgressStore::new(MemoryStore::default());
        store.save("runner", Progress { level: 1, lives: 3 }).unwrap();
        store.clear("runner").unwrap();
        assert_eq!(store.load("runner").unwrap(), None);
    }

    #[test]
    fn file_store_roundtrip_and_absence() {
        let dir = std::env::temp_dir().join(format!("arcade-hub-test-{}", std::process::id()));
        let mut store = ProgressStore::new(FileStore::new(&dir));

        assert_eq!(store.load("platformer").unwrap(), None);

        let progress = Progress { level: 7, lives: 1 };
        store.save("platformer", progress).unwrap();
        assert_eq!(store.load("platformer").unwrap(), Some(progress));

        store.clear("platformer").unwrap();
        assert_eq!(store.load("platformer").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
