//! HTTP Client port

use async_trait::async_trait;
use courier_domain::{DispatchResponse, PreparedRequest};

/// Errors that can occur while dispatching a request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpClientError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The body could not be sent as configured.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing prepared requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an unsendable body.
    async fn execute(
        &self,
        request: &PreparedRequest,
    ) -> Result<DispatchResponse, HttpClientError>;
}
