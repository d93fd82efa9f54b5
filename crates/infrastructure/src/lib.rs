//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod serialization;
pub mod storage;

pub use adapters::{DEFAULT_TIMEOUT, ReqwestHttpClient};
pub use config::{AppConfig, ConfigError, STORAGE_DIR_ENV};
pub use serialization::{
    SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
pub use storage::{FileStorage, MemoryStorage};
