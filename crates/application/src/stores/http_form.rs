//! Request-form stores for the GET, POST, PUT and DELETE tabs.

use courier_domain::request::{
    BodyType, FormBody, FormDataEntry, HttpFormState, HttpMethod, KeyValueRow, NoBody,
    PreparedRequest, RequestBody, RequestFormState,
};
use courier_domain::{DomainResult, StoreKind};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::persistence::{Backing, PersistError, Persisted};

/// Persisted state of one request form.
///
/// GET and DELETE stores are `HttpFormStore<NoBody>`; POST and PUT share
/// `HttpFormStore<RequestBody>` and add the body setters.
#[derive(Debug)]
pub struct HttpFormStore<B> {
    method: HttpMethod,
    inner: Persisted<HttpFormState<B>>,
}

impl<B> HttpFormStore<B>
where
    B: Serialize + DeserializeOwned + 'static,
{
    fn open(method: HttpMethod, initial: HttpFormState<B>, backing: &Backing) -> Self {
        let key = StoreKind::for_method(method).persistence_key();
        Self {
            method,
            inner: Persisted::open(key, initial, backing),
        }
    }
}

impl HttpFormStore<NoBody> {
    /// Opens the GET form store.
    #[must_use]
    pub fn get(backing: &Backing) -> Self {
        Self::open(HttpMethod::Get, HttpFormState::default_get(), backing)
    }

    /// Opens the DELETE form store.
    #[must_use]
    pub fn delete(backing: &Backing) -> Self {
        Self::open(HttpMethod::Delete, HttpFormState::default_delete(), backing)
    }
}

impl HttpFormStore<RequestBody> {
    /// Opens the POST form store.
    #[must_use]
    pub fn post(backing: &Backing) -> Self {
        Self::open(HttpMethod::Post, HttpFormState::default_post(), backing)
    }

    /// Opens the PUT form store.
    #[must_use]
    pub fn put(backing: &Backing) -> Self {
        Self::open(HttpMethod::Put, HttpFormState::default_put(), backing)
    }

    /// Switches between JSON and form-data without clearing either.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_body_type(&mut self, body_type: BodyType) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_body_type(body_type))
    }

    /// Replaces the raw body text.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_body_raw(&mut self, raw: impl Into<String>) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_body_raw(raw))
    }

    /// Replaces the form-data entries. File contents are not persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_body_form_data(&mut self, entries: Vec<FormDataEntry>) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_body_form_data(entries))
    }
}

impl<B> HttpFormStore<B> {
    /// Returns the method this form sends.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the persistence key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.inner.key()
    }

    /// Returns the full store state.
    #[must_use]
    pub const fn state(&self) -> &HttpFormState<B> {
        self.inner.state()
    }

    /// Returns the request being edited.
    #[must_use]
    pub const fn request(&self) -> &RequestFormState<B> {
        &self.inner.state().request
    }

    /// Replaces the URL verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_url(url))
    }

    /// Replaces the parameter rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_params(&mut self, params: Vec<KeyValueRow>) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_params(params))
    }

    /// Replaces the header rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_headers(&mut self, headers: Vec<KeyValueRow>) -> Result<(), PersistError> {
        self.inner.update(|s| s.request.set_headers(headers))
    }
}

impl<B: FormBody> HttpFormStore<B> {
    /// Builds a dispatchable request from the current form.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn prepare(&self) -> DomainResult<PreparedRequest> {
        PreparedRequest::from_form(self.method, self.request())
    }
}
