//! Request form state for the four HTTP method tabs

use serde::{Deserialize, Serialize};

use super::body::{BodyType, FormDataEntry, NoBody, RequestBody};
use super::row::KeyValueRow;

const JSONPLACEHOLDER_POST: &str = "https://jsonplaceholder.typicode.com/posts/1";
const JSONPLACEHOLDER_POSTS: &str = "https://jsonplaceholder.typicode.com/posts";

const DEFAULT_POST_BODY: &str = "{\n  \"title\": \"foo\",\n  \"body\": \"bar\",\n  \"userId\": 1\n}";
const DEFAULT_PUT_BODY: &str =
    "{\n  \"id\": 1,\n  \"title\": \"foo\",\n  \"body\": \"bar\",\n  \"userId\": 1\n}";

/// Editable state of one request form.
///
/// `B` is the body slot: [`NoBody`] for GET and DELETE, [`RequestBody`]
/// for POST and PUT. Body fields are flattened next to `url`, `params`
/// and `headers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFormState<B = NoBody> {
    /// Target URL, kept verbatim
    pub url: String,
    /// Query parameter rows
    pub params: Vec<KeyValueRow>,
    /// Header rows
    pub headers: Vec<KeyValueRow>,
    /// Body slot
    #[serde(flatten)]
    pub body: B,
}

impl<B> RequestFormState<B> {
    /// Replaces the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Replaces the whole parameter list.
    pub fn set_params(&mut self, params: Vec<KeyValueRow>) {
        self.params = params;
    }

    /// Replaces the whole header list.
    pub fn set_headers(&mut self, headers: Vec<KeyValueRow>) {
        self.headers = headers;
    }
}

impl RequestFormState<RequestBody> {
    /// Switches the active body representation. The inactive one is kept.
    pub const fn set_body_type(&mut self, body_type: BodyType) {
        self.body.body_type = body_type;
    }

    /// Replaces the raw body text.
    pub fn set_body_raw(&mut self, raw: impl Into<String>) {
        self.body.body_raw = raw.into();
    }

    /// Replaces the form-data entries.
    pub fn set_body_form_data(&mut self, entries: Vec<FormDataEntry>) {
        self.body.body_form_data = entries;
    }
}

/// State held by an HTTP form store: the form under `request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpFormState<B = NoBody> {
    /// The request being edited
    pub request: RequestFormState<B>,
}

impl HttpFormState<NoBody> {
    /// Initial GET form: a blank parameter row and an `Accept` header.
    #[must_use]
    pub fn default_get() -> Self {
        Self {
            request: RequestFormState {
                url: JSONPLACEHOLDER_POST.to_string(),
                params: vec![KeyValueRow::blank()],
                headers: vec![KeyValueRow::new("Accept", "application/json")],
                body: NoBody {},
            },
        }
    }

    /// Initial DELETE form: no parameters, no headers.
    #[must_use]
    pub fn default_delete() -> Self {
        Self {
            request: RequestFormState {
                url: JSONPLACEHOLDER_POST.to_string(),
                params: Vec::new(),
                headers: Vec::new(),
                body: NoBody {},
            },
        }
    }
}

impl HttpFormState<RequestBody> {
    /// Initial POST form creating a post.
    #[must_use]
    pub fn default_post() -> Self {
        Self::with_json_body(JSONPLACEHOLDER_POSTS, DEFAULT_POST_BODY)
    }

    /// Initial PUT form replacing post 1.
    #[must_use]
    pub fn default_put() -> Self {
        Self::with_json_body(JSONPLACEHOLDER_POST, DEFAULT_PUT_BODY)
    }

    fn with_json_body(url: &str, raw: &str) -> Self {
        Self {
            request: RequestFormState {
                url: url.to_string(),
                params: Vec::new(),
                headers: vec![KeyValueRow::new("Content-Type", "application/json")],
                body: RequestBody::json(raw),
            },
        }
    }
}
