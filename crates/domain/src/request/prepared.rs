//! Assembly of a request form into a dispatchable request

use url::Url;

use super::body::{FormBody, OutgoingBody};
use super::form::RequestFormState;
use super::method::HttpMethod;
use super::row::active_rows;
use crate::error::{DomainError, DomainResult};

/// A request built from a form, ready for an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Final URL including the active query parameters
    pub url: Url,
    /// Active headers as (name, value) pairs in form order
    pub headers: Vec<(String, String)>,
    /// Body, for forms that carry one
    pub body: Option<OutgoingBody>,
}

impl PreparedRequest {
    /// Builds a request from the form's current state.
    ///
    /// Disabled rows and rows with an empty key are left out. Active
    /// parameters are appended after any query already present in the URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL cannot be parsed.
    pub fn from_form<B: FormBody>(
        method: HttpMethod,
        form: &RequestFormState<B>,
    ) -> DomainResult<Self> {
        let trimmed = form.url.trim();
        let mut url =
            Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;

        let mut params = active_rows(&form.params).peekable();
        if params.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for row in params {
                pairs.append_pair(&row.key, &row.value);
            }
        }

        let headers = active_rows(&form.headers)
            .map(|row| (row.key.clone(), row.value.clone()))
            .collect();

        Ok(Self {
            method,
            url,
            headers,
            body: form.body.outgoing(),
        })
    }

    /// Returns true if a header with this name is present (case-insensitive).
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}
