//! Local filesystem key-value store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::storage::{KeyValueStore, StorageError, validate_key};

/// Stores each key as `<root>/<key>.json`.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a new local store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadError(format!("{}: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.root).map_err(|e| {
            StorageError::WriteError(format!("create dir {}: {e}", self.root.display()))
        })?;

        fs::write(&path, value)
            .map_err(|e| StorageError::WriteError(format!("{}: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::RemoveError(format!("{}: {e}", path.display()))),
        }
    }
}
