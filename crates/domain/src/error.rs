//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while interpreting workbench state.
///
/// Store mutators never fail; these only surface when state is turned
/// into something else (a dispatchable request, a parsed identifier).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not one the workbench offers a form for.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type is neither `json` nor `form-data`.
    #[error("unsupported body type: {0}")]
    UnsupportedBodyType(String),

    /// No store is registered under the given name.
    #[error("unknown store: {0}")]
    UnknownStore(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
