//! The persisted workbench stores.

mod http_form;
mod sse;
mod websocket;

pub use http_form::HttpFormStore;
pub use sse::SseStore;
pub use websocket::WebSocketStore;
