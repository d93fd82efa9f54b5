//! State storage port
//!
//! Durable key/value storage for store snapshots, in the spirit of a
//! browser's local storage: one JSON record per persistence key.

use serde_json::Value;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backend cannot be used (missing directory, poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for reading and writing store snapshots.
///
/// Operations are synchronous: store mutators call `write` inline and
/// must not suspend.
pub trait StateStorage: Send + Sync {
    /// Reads the record saved under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replaces the record saved under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn write(&self, key: &str, snapshot: &Value) -> Result<(), StorageError>;

    /// Deletes the record saved under `key`. Missing records are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Returns true if a record is saved under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.read(key)?.is_some())
    }
}
