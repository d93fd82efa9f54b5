//! Dispatch Request Use Case
//!
//! Sends the current state of one request form through the HTTP client.

use std::sync::Arc;

use courier_domain::{DispatchResponse, request::HttpMethod};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::HttpClient;
use crate::workbench::Workbench;

/// Use case for sending a request form.
///
/// # Example
///
/// ```ignore
/// let use_case = DispatchRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let response = use_case.execute(&workbench, HttpMethod::Get).await?;
/// ```
pub struct DispatchRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> DispatchRequest<C> {
    /// Creates a new `DispatchRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Assembles the form for `method` and sends it.
    ///
    /// # Errors
    ///
    /// Returns an error if the form's URL is invalid or the request fails.
    pub async fn execute(
        &self,
        workbench: &Workbench,
        method: HttpMethod,
    ) -> ApplicationResult<DispatchResponse> {
        let request = workbench.prepare(method)?;
        info!(%method, url = %request.url, "dispatching request form");

        let response = self.client.execute(&request).await?;
        info!(
            status = response.status,
            duration = %response.duration_display(),
            "request form answered"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use courier_domain::PreparedRequest;
    use courier_domain::request::OutgoingBody;

    use crate::ApplicationError;
    use crate::ports::HttpClientError;

    #[derive(Default)]
    struct CapturingClient {
        seen: Mutex<Vec<PreparedRequest>>,
    }

    #[async_trait]
    impl HttpClient for CapturingClient {
        async fn execute(
            &self,
            request: &PreparedRequest,
        ) -> Result<DispatchResponse, HttpClientError> {
            self.seen.lock().expect("lock").push(request.clone());
            Ok(DispatchResponse {
                status: 201,
                headers: Vec::new(),
                body: b"{}".to_vec(),
                duration: Duration::from_millis(5),
            })
        }
    }

    struct FailingClient;

    #[async_trait]
    impl HttpClient for FailingClient {
        async fn execute(
            &self,
            _request: &PreparedRequest,
        ) -> Result<DispatchResponse, HttpClientError> {
            Err(HttpClientError::Timeout { timeout_ms: 30_000 })
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_current_form() {
        let client = Arc::new(CapturingClient::default());
        let use_case = DispatchRequest::new(Arc::clone(&client));
        let mut workbench = Workbench::in_memory();
        workbench
            .post_form_mut()
            .set_body_raw("{\"title\":\"x\"}")
            .expect("set body");

        let response = use_case
            .execute(&workbench, HttpMethod::Post)
            .await
            .expect("dispatch");

        assert_eq!(response.status, 201);
        let seen = client.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].body,
            Some(OutgoingBody::Json("{\"title\":\"x\"}".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_sent() {
        let client = Arc::new(CapturingClient::default());
        let use_case = DispatchRequest::new(Arc::clone(&client));
        let mut workbench = Workbench::in_memory();
        workbench.get_form_mut().set_url("").expect("set url");

        let result = use_case.execute(&workbench, HttpMethod::Get).await;

        assert!(matches!(result, Err(ApplicationError::Domain(_))));
        assert!(client.seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn test_client_errors_propagate() {
        let use_case = DispatchRequest::new(Arc::new(FailingClient));
        let workbench = Workbench::in_memory();

        let result = use_case.execute(&workbench, HttpMethod::Delete).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Http(HttpClientError::Timeout { .. }))
        ));
    }
}
