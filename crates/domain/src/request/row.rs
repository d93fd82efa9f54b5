//! Key/value rows shared by query parameters and headers

use serde::{Deserialize, Serialize};

/// A single editable query parameter or header.
///
/// Rows can be disabled without being deleted. Keys are not unique and
/// list order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValueRow {
    /// The row key
    #[serde(default)]
    pub key: String,
    /// The row value
    #[serde(default)]
    pub value: String,
    /// Whether this row takes part in the built request
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValueRow {
    /// Creates a new enabled row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled row.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// Creates the enabled, empty placeholder row a form starts with.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Returns true if the row contributes to an outgoing request.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Returns the rows that contribute to an outgoing request, in order.
pub fn active_rows(rows: &[KeyValueRow]) -> impl Iterator<Item = &KeyValueRow> {
    rows.iter().filter(|row| row.is_active())
}
