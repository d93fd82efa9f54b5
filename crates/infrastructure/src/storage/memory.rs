//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use courier_application::ports::{StateStorage, StorageError};
use serde_json::Value;

/// Storage keeping records in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

impl StateStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, snapshot: &Value) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(key.to_string(), snapshot.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(key);
        Ok(())
    }
}
