//! Application error types

use courier_domain::DomainError;
use thiserror::Error;

use crate::persistence::PersistError;
use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A store mutation could not be persisted.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
