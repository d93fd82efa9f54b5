//! Response of a dispatched request form.

use std::borrow::Cow;
use std::time::Duration;

/// What came back from dispatching a [`crate::PreparedRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers in arrival order
    pub headers: Vec<(String, String)>,
    /// Raw response body
    pub body: Vec<u8>,
    /// Time from send until the body was read
    pub duration: Duration,
}

impl DispatchResponse {
    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the duration as a display string.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let ms = self.duration.as_millis();
        if ms < 1000 {
            format!("{ms}ms")
        } else {
            format!("{:.1}s", self.duration.as_secs_f64())
        }
    }
}
