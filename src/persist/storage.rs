//! Key-value storage backends for saved documents.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use rustc_hash::FxHashMap;

use super::error::PersistenceError;

/// Key the tracker saves its state under.
pub const STORAGE_KEY: &str = "ti4-game-tracker-state";

/// A string key-value store.
pub trait Storage {
    /// Read a value. `None` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store a value, replacing any previous one.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Delete a value. False when nothing was stored.
    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError>;
}

/// In-process storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        // Readers only ever see a complete document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("round-tracker-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read(STORAGE_KEY).unwrap(), None);

        storage.write(STORAGE_KEY, "{}").unwrap();
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);

        assert!(storage.remove(STORAGE_KEY).unwrap());
        assert!(!storage.remove(STORAGE_KEY).unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage() {
        let dir = scratch_dir("file");
        let mut storage = FileStorage::open(&dir).unwrap();

        assert_eq!(storage.read(STORAGE_KEY).unwrap(), None);
        storage.write(STORAGE_KEY, "first").unwrap();
        storage.write(STORAGE_KEY, "second").unwrap();
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("second"));
        assert!(dir.join("ti4-game-tracker-state.json").exists());

        assert!(storage.remove(STORAGE_KEY).unwrap());
        assert_eq!(storage.read(STORAGE_KEY).unwrap(), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = scratch_dir("keys");
        let storage = FileStorage::open(&dir).unwrap();

        assert!(matches!(
            storage.read("../escape"),
            Err(PersistenceError::InvalidKey(_))
        ));
        assert!(matches!(storage.read(""), Err(PersistenceError::InvalidKey(_))));

        fs::remove_dir_all(&dir).unwrap();
    }
}
