//! Key-value storage for client-local state.
//!
//! Values are serialized strings addressed by key, mirroring browser local
//! storage. The recent-search history is the main consumer.

pub mod local;
pub mod memory;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to write: {0}")]
    WriteError(String),

    #[error("Failed to remove: {0}")]
    RemoveError(String),
}

/// Trait for key-value stores (local directory, in-memory, etc.).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys become file names, so restrict them to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
