use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, instrument};

use super::error::CartStorageError;

/// String key-value storage on the visitor's device.
pub trait CartStorage: Send + Sync {
    /// `None` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError>;
    fn save(&self, key: &str, payload: &str) -> Result<(), CartStorageError>;
    fn clear(&self, key: &str) -> Result<(), CartStorageError>;
}

/// Keeps one `{key}.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileStorage {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, payload))]
    fn save(&self, key: &str, payload: &str) -> Result<(), CartStorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file_for(key), payload)?;
        debug!(bytes = payload.len(), "Cart persisted");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<(), CartStorageError> {
        match fs::remove_file(self.file_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CartStorageError> {
        self.entries
            .lock()
            .map_err(|_| CartStorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), CartStorageError> {
        self.entries()?.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), CartStorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

impl<S: CartStorage + ?Sized> CartStorage for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), CartStorageError> {
        (**self).save(key, payload)
    }

    fn clear(&self, key: &str) -> Result<(), CartStorageError> {
        (**self).clear(key)
    }
}
