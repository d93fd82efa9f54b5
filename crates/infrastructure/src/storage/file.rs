//! Directory-backed storage backend.
//!
//! Each record lives in its own file named after the persistence key:
//!
//! ```text
//! <dir>/http-get-store.json
//! <dir>/http-post-store.json
//! <dir>/sse-store.json
//! ...
//! ```
//!
//! Records are replaced by writing a sibling temporary file and renaming
//! it over the old one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use courier_application::ports::{StateStorage, StorageError};
use serde_json::Value;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Storage writing one JSON file per key into a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a key is stored in.
    ///
    /// # Errors
    ///
    /// Returns an error if the key could escape the storage directory.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Unavailable(format!(
                "invalid persistence key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StateStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.record_path(key)?;
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };

        from_json_bytes(&content)
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))
    }

    fn write(&self, key: &str, snapshot: &Value) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        let content =
            to_json_stable_bytes(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))?;

        // Ensure storage directory exists
        fs::create_dir_all(&self.dir)?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, &content)?;
        fs::rename(&staging, &path)?;

        debug!(key, bytes = content.len(), path = %path.display(), "wrote store record");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_record_path() {
        let storage = FileStorage::new("/tmp/courier");
        assert_eq!(
            storage.record_path("sse-store").expect("valid key"),
            PathBuf::from("/tmp/courier/sse-store.json")
        );
    }

    #[test]
    fn test_record_path_rejects_traversal() {
        let storage = FileStorage::new("/tmp/courier");
        assert!(storage.record_path("../etc/passwd").is_err());
        assert!(storage.record_path("").is_err());
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let storage = FileStorage::new(temp_dir.path().join("state"));

        storage
            .write("websocket-store", &json!({"url": "wss://echo.websocket.org"}))
            .expect("write");

        let content = fs::read_to_string(temp_dir.path().join("state/websocket-store.json"))
            .expect("record file");
        assert_eq!(content, "{\n  \"url\": \"wss://echo.websocket.org\"\n}\n");
        assert!(!temp_dir.path().join("state/websocket-store.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_returns_none() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let storage = FileStorage::new(temp_dir.path());
        assert_eq!(storage.read("http-put-store").expect("read"), None);
    }

    #[test]
    fn test_read_garbage_is_serialization_error() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("sse-store.json"), b"{not json").expect("seed");
        let storage = FileStorage::new(temp_dir.path());

        assert!(matches!(
            storage.read("sse-store"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_remove() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let storage = FileStorage::new(temp_dir.path());
        storage.write("sse-store", &json!({})).expect("write");

        storage.remove("sse-store").expect("remove");
        storage.remove("sse-store").expect("remove again");
        assert!(!storage.contains("sse-store").expect("contains"));
    }
}
