//! Catalogue of the persisted workbench stores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// Identifies one of the independently persisted stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// GET request form
    Get,
    /// POST request form
    Post,
    /// PUT request form
    Put,
    /// DELETE request form
    Delete,
    /// Server-Sent-Event subscription
    Sse,
    /// WebSocket session
    WebSocket,
}

impl StoreKind {
    /// Returns every store in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Sse,
            Self::WebSocket,
        ]
    }

    /// Returns the stable key the store's snapshot is saved under.
    #[must_use]
    pub const fn persistence_key(self) -> &'static str {
        match self {
            Self::Get => "http-get-store",
            Self::Post => "http-post-store",
            Self::Put => "http-put-store",
            Self::Delete => "http-delete-store",
            Self::Sse => "sse-store",
            Self::WebSocket => "websocket-store",
        }
    }

    /// Returns the short name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Sse => "sse",
            Self::WebSocket => "websocket",
        }
    }

    /// Returns the request form store for an HTTP method.
    #[must_use]
    pub const fn for_method(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::Get,
            HttpMethod::Post => Self::Post,
            HttpMethod::Put => Self::Put,
            HttpMethod::Delete => Self::Delete,
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoreKind {
    type Err = DomainError;

    /// Accepts either the short name or the persistence key.
    fn from_str(s: &str) -> DomainResult<Self> {
        let lowered = s.to_lowercase();
        if lowered == "ws" {
            return Ok(Self::WebSocket);
        }
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == lowered || kind.persistence_key() == lowered)
            .ok_or_else(|| DomainError::UnknownStore(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_keys_are_unique() {
        let mut keys: Vec<_> = StoreKind::all().iter().map(|k| k.persistence_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), StoreKind::all().len());
    }

    #[test]
    fn test_parse_by_name_or_key() {
        assert_eq!("post".parse::<StoreKind>(), Ok(StoreKind::Post));
        assert_eq!("sse-store".parse::<StoreKind>(), Ok(StoreKind::Sse));
        assert_eq!("ws".parse::<StoreKind>(), Ok(StoreKind::WebSocket));
        assert_eq!(
            "graphql".parse::<StoreKind>(),
            Err(DomainError::UnknownStore("graphql".to_string()))
        );
    }

    #[test]
    fn test_for_method() {
        assert_eq!(StoreKind::for_method(HttpMethod::Delete), StoreKind::Delete);
        assert_eq!(
            StoreKind::for_method(HttpMethod::Get).persistence_key(),
            "http-get-store"
        );
    }
}
