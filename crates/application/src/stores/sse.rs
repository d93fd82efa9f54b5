//! Stream-subscription store for the SSE tab.

use courier_domain::{StoreKind, StreamSubscriptionState};

use crate::persistence::{Backing, PersistError, Persisted};

/// Persisted SSE endpoint and custom event names.
#[derive(Debug)]
pub struct SseStore {
    inner: Persisted<StreamSubscriptionState>,
}

impl SseStore {
    /// Opens the SSE store.
    #[must_use]
    pub fn open(backing: &Backing) -> Self {
        Self {
            inner: Persisted::open(
                StoreKind::Sse.persistence_key(),
                StreamSubscriptionState::default(),
                backing,
            ),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &StreamSubscriptionState {
        self.inner.state()
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.state().url
    }

    /// Returns the custom event names in insertion order.
    #[must_use]
    pub fn custom_events(&self) -> &[String] {
        &self.inner.state().custom_events
    }

    /// Replaces the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), PersistError> {
        self.inner.update(|s| s.set_url(url))
    }

    /// Adds an event name unless it is empty or already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn add_custom_event(&mut self, name: &str) -> Result<bool, PersistError> {
        self.inner.update_if(|s| s.add_custom_event(name))
    }

    /// Removes an event name; absent names are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn remove_custom_event(&mut self, name: &str) -> Result<bool, PersistError> {
        self.inner.update_if(|s| s.remove_custom_event(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_twice_keeps_length() {
        let mut store = SseStore::open(&Backing::Ephemeral);
        store.add_custom_event("x").expect("add");
        let len = store.custom_events().len();
        assert!(!store.add_custom_event("x").expect("add again"));
        assert_eq!(store.custom_events().len(), len);
    }

    #[test]
    fn test_remove_missing_does_not_fail() {
        let mut store = SseStore::open(&Backing::Ephemeral);
        let before = store.state().clone();
        assert!(!store.remove_custom_event("missing").expect("remove"));
        assert_eq!(store.state(), &before);
    }
}
