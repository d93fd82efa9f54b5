//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port, sending assembled
//! request forms and collecting the full response.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use courier_application::ports::{HttpClient, HttpClientError};
use courier_domain::request::{HttpMethod, OutgoingBody, OutgoingPart};
use courier_domain::{DispatchResponse, PreparedRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - User-Agent: "Courier/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new HTTP client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Courier/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds a multipart form from outgoing parts.
    fn build_form(parts: &[OutgoingPart]) -> Result<Form, HttpClientError> {
        let mut form = Form::new();

        for part in parts {
            match part {
                OutgoingPart::Text { name, value } => {
                    form = form.text(name.clone(), value.clone());
                }
                OutgoingPart::File { name, attachment } => {
                    let mime_type = attachment.content_type.clone().unwrap_or_else(|| {
                        mime_guess::from_path(&attachment.file_name)
                            .first_or_octet_stream()
                            .to_string()
                    });
                    let file_part = Part::bytes(attachment.data.clone())
                        .file_name(attachment.file_name.clone())
                        .mime_str(&mime_type)
                        .map_err(|e| HttpClientError::InvalidBody(format!("{mime_type}: {e}")))?;
                    form = form.part(name.clone(), file_part);
                }
            }
        }

        Ok(form)
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }
        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }
        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: &PreparedRequest,
    ) -> Result<DispatchResponse, HttpClientError> {
        let multipart = matches!(request.body, Some(OutgoingBody::Multipart(_)));

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(self.timeout);

        for (name, value) in &request.headers {
            // The multipart boundary header is generated by the form
            if multipart && name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        match &request.body {
            None => {}
            Some(OutgoingBody::Json(raw)) => {
                if !request.has_header(CONTENT_TYPE.as_str()) {
                    builder = builder.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
                }
                builder = builder.body(raw.clone());
            }
            Some(OutgoingBody::Multipart(parts)) => {
                builder = builder.multipart(Self::build_form(parts)?);
            }
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    v.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        Ok(DispatchResponse {
            status,
            headers,
            body,
            duration: start.elapsed(),
        })
    }
}
