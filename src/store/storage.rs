use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{DenError, DenResult};

/// Key-value storage capability the store is built on
///
/// Stands in for browser local storage: opaque string payloads addressed by
/// key, no transactions, no locking. Injected so the store is testable
/// without touching the filesystem.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> DenResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DenResult<()>;
    fn remove(&self, key: &str) -> DenResult<()>;
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> DenResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DenError::Storage("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DenResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DenError::Storage("storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DenResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DenError::Storage("storage lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed storage, one JSON document per key
///
/// Writes are whole-file overwrites with last-writer-wins semantics, matching
/// the single-writer deployment the store assumes.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> DenResult<Self> {
        fs::create_dir_all(&root)
            .map_err(|e| DenError::Storage(format!("cannot create {}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> DenResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DenError::Storage(format!("read {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> DenResult<()> {
        fs::write(self.path_for(key), value)
            .map_err(|e| DenError::Storage(format!("write {}: {}", key, e)))
    }

    fn remove(&self, key: &str) -> DenResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DenError::Storage(format!("remove {}: {}", key, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("favorites").unwrap(), None);

        storage.set("favorites", "[]").unwrap();
        assert_eq!(storage.get("favorites").unwrap(), Some("[]".to_string()));

        storage.remove("favorites").unwrap();
        assert_eq!(storage.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.remove("missing").unwrap();
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.get("watch-history").unwrap(), None);
        storage.set("watch-history", r#"[{"x":1}]"#).unwrap();
        assert_eq!(
            storage.get("watch-history").unwrap(),
            Some(r#"[{"x":1}]"#.to_string())
        );

        storage.remove("watch-history").unwrap();
        assert_eq!(storage.get("watch-history").unwrap(), None);
        storage.remove("watch-history").unwrap();
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
            storage.set("favorites", "[1,2,3]").unwrap();
        }
        let reopened = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(
            reopened.get("favorites").unwrap(),
            Some("[1,2,3]".to_string())
        );
    }
}
