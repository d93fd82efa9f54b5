//! Courier Application - Stores, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (state storage, HTTP client)
//! - Scoped persistence wrapping each store's state
//! - The six workbench stores and the `Workbench` that owns them
//! - Use case orchestration

pub mod error;
pub mod persistence;
pub mod ports;
pub mod stores;
pub mod use_cases;
pub mod workbench;

pub use error::{ApplicationError, ApplicationResult};
pub use persistence::{
    Backing, NoopHook, PersistError, Persisted, SaveHook, SharedStorage, StorageHook,
};
pub use ports::{HttpClient, HttpClientError, StateStorage, StorageError};
pub use stores::{HttpFormStore, SseStore, WebSocketStore};
pub use use_cases::DispatchRequest;
pub use workbench::Workbench;
