//! WebSocket session state.
//!
//! The session form keeps the endpoint and a short log of messages. The
//! log is newest-first, holds at most [`MESSAGE_HISTORY_LIMIT`] entries and
//! never contains the same message twice. Re-sending a message already in
//! the log leaves its position unchanged.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Public echo server the session form starts with.
pub const DEFAULT_WEBSOCKET_URL: &str = "wss://echo.websocket.org";

/// Maximum number of messages kept in the history.
pub const MESSAGE_HISTORY_LIMIT: usize = 20;

/// Endpoint and message history of a WebSocket session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketSessionState {
    /// Socket endpoint (ws:// or wss://)
    pub url: String,
    /// Messages, newest first
    pub message_history: VecDeque<String>,
}

impl Default for SocketSessionState {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEBSOCKET_URL.to_string(),
            message_history: VecDeque::new(),
        }
    }
}

impl SocketSessionState {
    /// Replaces the endpoint URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Records a message at the front of the history.
    ///
    /// Does nothing if the message is already present anywhere. Drops the
    /// oldest entry once the limit is exceeded. Returns true if the history
    /// changed.
    pub fn add_message_to_history(&mut self, message: &str) -> bool {
        if self.message_history.iter().any(|m| m == message) {
            return false;
        }

        self.message_history.push_front(message.to_string());
        if self.message_history.len() > MESSAGE_HISTORY_LIMIT {
            self.message_history.pop_back();
        }
        true
    }

    /// Messages, newest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.message_history.iter().map(String::as_str)
    }

    /// Restores the history invariants on state read from outside.
    ///
    /// Later duplicates are removed and the tail is trimmed to the limit.
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.message_history.retain(|m| seen.insert(m.clone()));
        self.message_history.truncate(MESSAGE_HISTORY_LIMIT);
    }
}
