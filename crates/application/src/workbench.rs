//! Composition root owning one instance of every store.

use courier_domain::request::{HttpMethod, NoBody, PreparedRequest, RequestBody};
use courier_domain::{DomainResult, StoreKind};
use serde_json::Value;

use crate::persistence::Backing;
use crate::stores::{HttpFormStore, SseStore, WebSocketStore};

/// All stores of one session, opened from the same backing.
///
/// Consumers borrow the stores they need; nothing here is global.
#[derive(Debug)]
pub struct Workbench {
    get: HttpFormStore<NoBody>,
    post: HttpFormStore<RequestBody>,
    put: HttpFormStore<RequestBody>,
    delete: HttpFormStore<NoBody>,
    sse: SseStore,
    websocket: WebSocketStore,
}

impl Workbench {
    /// Opens every store, restoring saved state where present.
    #[must_use]
    pub fn open(backing: &Backing) -> Self {
        Self {
            get: HttpFormStore::get(backing),
            post: HttpFormStore::post(backing),
            put: HttpFormStore::put(backing),
            delete: HttpFormStore::delete(backing),
            sse: SseStore::open(backing),
            websocket: WebSocketStore::open(backing),
        }
    }

    /// Opens every store with default state and no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(&Backing::Ephemeral)
    }

    /// GET form store.
    #[must_use]
    pub const fn get_form(&self) -> &HttpFormStore<NoBody> {
        &self.get
    }

    /// Mutable GET form store.
    pub const fn get_form_mut(&mut self) -> &mut HttpFormStore<NoBody> {
        &mut self.get
    }

    /// POST form store.
    #[must_use]
    pub const fn post_form(&self) -> &HttpFormStore<RequestBody> {
        &self.post
    }

    /// Mutable POST form store.
    pub const fn post_form_mut(&mut self) -> &mut HttpFormStore<RequestBody> {
        &mut self.post
    }

    /// PUT form store.
    #[must_use]
    pub const fn put_form(&self) -> &HttpFormStore<RequestBody> {
        &self.put
    }

    /// Mutable PUT form store.
    pub const fn put_form_mut(&mut self) -> &mut HttpFormStore<RequestBody> {
        &mut self.put
    }

    /// DELETE form store.
    #[must_use]
    pub const fn delete_form(&self) -> &HttpFormStore<NoBody> {
        &self.delete
    }

    /// Mutable DELETE form store.
    pub const fn delete_form_mut(&mut self) -> &mut HttpFormStore<NoBody> {
        &mut self.delete
    }

    /// SSE store.
    #[must_use]
    pub const fn sse(&self) -> &SseStore {
        &self.sse
    }

    /// Mutable SSE store.
    pub const fn sse_mut(&mut self) -> &mut SseStore {
        &mut self.sse
    }

    /// WebSocket store.
    #[must_use]
    pub const fn websocket(&self) -> &WebSocketStore {
        &self.websocket
    }

    /// Mutable WebSocket store.
    pub const fn websocket_mut(&mut self) -> &mut WebSocketStore {
        &mut self.websocket
    }

    /// Builds the request of the form for `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the form's URL cannot be parsed.
    pub fn prepare(&self, method: HttpMethod) -> DomainResult<PreparedRequest> {
        match method {
            HttpMethod::Get => self.get.prepare(),
            HttpMethod::Post => self.post.prepare(),
            HttpMethod::Put => self.put.prepare(),
            HttpMethod::Delete => self.delete.prepare(),
        }
    }

    /// Returns the JSON snapshot a store would persist right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded.
    pub fn snapshot(&self, kind: StoreKind) -> Result<Value, serde_json::Error> {
        match kind {
            StoreKind::Get => serde_json::to_value(self.get.state()),
            StoreKind::Post => serde_json::to_value(self.post.state()),
            StoreKind::Put => serde_json::to_value(self.put.state()),
            StoreKind::Delete => serde_json::to_value(self.delete.state()),
            StoreKind::Sse => serde_json::to_value(self.sse.state()),
            StoreKind::WebSocket => serde_json::to_value(self.websocket.state()),
        }
    }
}
