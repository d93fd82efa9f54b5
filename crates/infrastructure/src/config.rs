//! Application configuration.
//!
//! Store records live in the platform-specific config directory by default:
//! - Linux: ~/.config/courier/state
//! - macOS: ~/Library/Application Support/courier/state
//! - Windows: %APPDATA%/courier/state

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::DEFAULT_TIMEOUT;
use crate::storage::FileStorage;

/// Environment variable overriding the storage directory.
pub const STORAGE_DIR_ENV: &str = "COURIER_STORAGE_DIR";

/// Error type for configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not determine config directory.
    #[error("Could not determine config directory; set {STORAGE_DIR_ENV}")]
    NoConfigDir,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding one record file per store.
    pub storage_dir: PathBuf,
    /// Timeout for dispatched requests.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Resolves the configuration.
    ///
    /// An explicit directory (command line or environment) wins over the
    /// platform default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no directory is given and the
    /// platform has no config directory.
    pub fn resolve(storage_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let storage_dir = storage_dir
            .or_else(Self::default_storage_dir)
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(Self {
            storage_dir,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the platform default storage directory, if available.
    #[must_use]
    pub fn default_storage_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("courier").join("state"))
    }

    /// Opens the file storage for this configuration.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}
