//! Server-Sent-Event subscription state.

use serde::{Deserialize, Serialize};

/// Public demo endpoint the subscription form starts with.
pub const DEFAULT_SSE_URL: &str = "https://express-eventsource-demo.glitch.me/events";

/// Endpoint and custom event names for an SSE subscription.
///
/// `custom_events` behaves like an insertion-ordered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSubscriptionState {
    /// Event stream endpoint
    pub url: String,
    /// Named events to listen for besides `message`
    pub custom_events: Vec<String>,
}

impl Default for StreamSubscriptionState {
    fn default() -> Self {
        Self {
            url: DEFAULT_SSE_URL.to_string(),
            custom_events: vec!["user-login".to_string(), "user-logout".to_string()],
        }
    }
}

impl StreamSubscriptionState {
    /// Replaces the endpoint URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Appends an event name unless it is empty or already listed.
    ///
    /// Returns true if the list changed.
    pub fn add_custom_event(&mut self, name: &str) -> bool {
        if name.is_empty() || self.custom_events.iter().any(|e| e == name) {
            return false;
        }
        self.custom_events.push(name.to_string());
        true
    }

    /// Removes the first event with exactly this name.
    ///
    /// Returns true if the list changed.
    pub fn remove_custom_event(&mut self, name: &str) -> bool {
        match self.custom_events.iter().position(|e| e == name) {
            Some(index) => {
                self.custom_events.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_subscription() {
        let state = StreamSubscriptionState::default();
        assert_eq!(state.url, DEFAULT_SSE_URL);
        assert_eq!(state.custom_events, vec!["user-login", "user-logout"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = StreamSubscriptionState::default();
        assert!(state.add_custom_event("x"));
        assert!(!state.add_custom_event("x"));
        assert_eq!(state.custom_events.len(), 3);
        assert_eq!(state.custom_events.last().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut state = StreamSubscriptionState::default();
        assert!(!state.add_custom_event(""));
        assert_eq!(state.custom_events.len(), 2);
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let mut state = StreamSubscriptionState::default();
        assert!(state.add_custom_event("User-Login"));
        assert_eq!(state.custom_events.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut state = StreamSubscriptionState::default();
        let before = state.clone();
        assert!(!state.remove_custom_event("missing"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_existing() {
        let mut state = StreamSubscriptionState::default();
        assert!(state.remove_custom_event("user-login"));
        assert_eq!(state.custom_events, vec!["user-logout"]);
    }
}
