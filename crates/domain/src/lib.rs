//! Courier Domain - Workbench state types
//!
//! This crate defines the state kept by each workbench feature: the four
//! HTTP request forms, the SSE subscription and the WebSocket session.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod store;
pub mod stream;
pub mod websocket;

pub use error::{DomainError, DomainResult};
pub use request::{
    BodyType, FileAttachment, FormDataEntry, FormDataKind, FormDataValue, HttpFormState,
    HttpMethod, KeyValueRow, NoBody, PreparedRequest, RequestBody, RequestFormState,
};
pub use response::DispatchResponse;
pub use store::StoreKind;
pub use stream::StreamSubscriptionState;
pub use websocket::{MESSAGE_HISTORY_LIMIT, SocketSessionState};
