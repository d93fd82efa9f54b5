//! Socket-session store for the WebSocket tab.

use courier_domain::{SocketSessionState, StoreKind};

use crate::persistence::{Backing, PersistError, Persisted};

/// Persisted WebSocket endpoint and message history.
#[derive(Debug)]
pub struct WebSocketStore {
    inner: Persisted<SocketSessionState>,
}

impl WebSocketStore {
    /// Opens the WebSocket store.
    ///
    /// A restored history is repaired to hold no duplicates and at most
    /// the history limit.
    #[must_use]
    pub fn open(backing: &Backing) -> Self {
        let mut inner = Persisted::open(
            StoreKind::WebSocket.persistence_key(),
            SocketSessionState::default(),
            backing,
        );
        inner.repair(SocketSessionState::normalize);
        Self { inner }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &SocketSessionState {
        self.inner.state()
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.state().url
    }

    /// Messages, newest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.inner.state().messages()
    }

    /// Replaces the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), PersistError> {
        self.inner.update(|s| s.set_url(url))
    }

    /// Records a sent or received message.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn add_message_to_history(&mut self, message: &str) -> Result<bool, PersistError> {
        self.inner.update_if(|s| s.add_message_to_history(message))
    }
}
