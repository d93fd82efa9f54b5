//! HTTP Request body types for the POST and PUT forms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Which body representation a form sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BodyType {
    /// Raw JSON text
    #[default]
    #[serde(rename = "json")]
    Json,
    /// Multipart form data
    #[serde(rename = "form-data")]
    FormData,
}

impl BodyType {
    /// Returns the body type as it is persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::FormData => "form-data",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "json" => Ok(Self::Json),
            "form-data" => Ok(Self::FormData),
            _ => Err(DomainError::UnsupportedBodyType(s.to_string())),
        }
    }
}

/// Kind of a form-data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormDataKind {
    /// Plain text field
    #[default]
    Text,
    /// File upload field
    File,
}

/// An in-memory file picked for upload.
///
/// Attachments live only as long as the process; they are never written
/// to storage.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// File name sent in the multipart part
    pub file_name: String,
    /// Explicit MIME type, if known
    pub content_type: Option<String>,
    /// File contents
    pub data: Vec<u8>,
}

impl FileAttachment {
    /// Creates an attachment without an explicit MIME type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Value of a form-data entry.
///
/// Serializes as a plain string. A file value is written as the empty
/// string, and any non-string value read back becomes empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDataValue {
    /// Textual value
    Text(String),
    /// Transient file handle
    File(FileAttachment),
}

impl Default for FormDataValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Serialize for FormDataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::File(_) => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for FormDataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(text) => Self::Text(text),
            _ => Self::default(),
        })
    }
}

/// One row of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormDataEntry {
    /// Field name
    #[serde(default)]
    pub key: String,
    /// Field value
    #[serde(default)]
    pub value: FormDataValue,
    /// Whether the field is text or a file
    #[serde(rename = "type", default)]
    pub kind: FormDataKind,
    /// Whether the field is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl FormDataEntry {
    /// Creates an enabled text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FormDataValue::Text(value.into()),
            kind: FormDataKind::Text,
            enabled: true,
        }
    }

    /// Creates an enabled file field.
    #[must_use]
    pub fn file(key: impl Into<String>, attachment: FileAttachment) -> Self {
        Self {
            key: key.into(),
            value: FormDataValue::File(attachment),
            kind: FormDataKind::File,
            enabled: true,
        }
    }

    /// Creates the empty text row a form starts with.
    #[must_use]
    pub fn blank() -> Self {
        Self::text("", "")
    }

    /// Returns a disabled copy of this entry.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns the live attachment of a file field, if one is loaded.
    #[must_use]
    pub const fn attachment(&self) -> Option<&FileAttachment> {
        match &self.value {
            FormDataValue::File(attachment) => Some(attachment),
            FormDataValue::Text(_) => None,
        }
    }
}

/// Body state shared by the POST and PUT forms.
///
/// Both representations are kept so switching `body_type` back and forth
/// loses nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Active representation
    #[serde(default)]
    pub body_type: BodyType,
    /// Raw JSON text
    #[serde(default)]
    pub body_raw: String,
    /// Multipart entries
    #[serde(default)]
    pub body_form_data: Vec<FormDataEntry>,
}

impl RequestBody {
    /// Creates a JSON body with a single blank form-data row kept aside.
    #[must_use]
    pub fn json(raw: impl Into<String>) -> Self {
        Self {
            body_type: BodyType::Json,
            body_raw: raw.into(),
            body_form_data: vec![FormDataEntry::blank()],
        }
    }
}

/// Body marker for forms that never send a body (GET, DELETE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoBody {}

/// Body slot of a request form.
pub trait FormBody {
    /// Returns the body that should be sent, if any.
    fn outgoing(&self) -> Option<OutgoingBody>;
}

impl FormBody for NoBody {
    fn outgoing(&self) -> Option<OutgoingBody> {
        None
    }
}

impl FormBody for RequestBody {
    fn outgoing(&self) -> Option<OutgoingBody> {
        match self.body_type {
            BodyType::Json => Some(OutgoingBody::Json(self.body_raw.clone())),
            BodyType::FormData => Some(OutgoingBody::Multipart(
                self.body_form_data
                    .iter()
                    .filter(|entry| entry.enabled && !entry.key.is_empty())
                    .filter_map(OutgoingPart::from_entry)
                    .collect(),
            )),
        }
    }
}

/// A body ready to be handed to an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingBody {
    /// JSON text
    Json(String),
    /// Multipart parts in form order
    Multipart(Vec<OutgoingPart>),
}

/// A single multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingPart {
    /// Text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// Attached file
        attachment: FileAttachment,
    },
}

impl OutgoingPart {
    /// Converts an entry into a part; file fields without a loaded file
    /// are skipped.
    fn from_entry(entry: &FormDataEntry) -> Option<Self> {
        match (&entry.kind, &entry.value) {
            (FormDataKind::Text, FormDataValue::Text(value)) => Some(Self::Text {
                name: entry.key.clone(),
                value: value.clone(),
            }),
            (_, FormDataValue::File(attachment)) => Some(Self::File {
                name: entry.key.clone(),
                attachment: attachment.clone(),
            }),
            (FormDataKind::File, FormDataValue::Text(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&BodyType::FormData).expect("serialize"),
            "\"form-data\""
        );
        assert_eq!("json".parse::<BodyType>(), Ok(BodyType::Json));
        assert!("xml".parse::<BodyType>().is_err());
    }

    #[test]
    fn test_file_value_is_written_as_empty_string() {
        let entry = FormDataEntry::file("avatar", FileAttachment::new("a.png", vec![1, 2, 3]));
        let json = serde_json::to_value(&entry).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({"key": "avatar", "value": "", "type": "file", "enabled": true})
        );
    }

    #[test]
    fn test_non_string_value_reads_back_as_empty_text() {
        let entry: FormDataEntry =
            serde_json::from_str(r#"{"key":"avatar","value":{},"type":"file","enabled":false}"#)
                .expect("entry should parse");

        assert_eq!(entry.key, "avatar");
        assert_eq!(entry.kind, FormDataKind::File);
        assert!(!entry.enabled);
        assert_eq!(entry.value, FormDataValue::Text(String::new()));
        assert!(entry.attachment().is_none());
    }

    #[test]
    fn test_request_body_uses_camel_case() {
        let body = RequestBody::json("{}");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["bodyType"], "json");
        assert_eq!(json["bodyRaw"], "{}");
        assert!(json["bodyFormData"].is_array());
    }

    #[test]
    fn test_outgoing_form_data_skips_inactive_and_unloaded_entries() {
        let body = RequestBody {
            body_type: BodyType::FormData,
            body_raw: "{}".to_string(),
            body_form_data: vec![
                FormDataEntry::text("name", "courier"),
                FormDataEntry::text("debug", "1").disabled(),
                FormDataEntry::blank(),
                FormDataEntry {
                    key: "upload".to_string(),
                    value: FormDataValue::default(),
                    kind: FormDataKind::File,
                    enabled: true,
                },
                FormDataEntry::file("doc", FileAttachment::new("doc.txt", b"hi".to_vec())),
            ],
        };

        let Some(OutgoingBody::Multipart(parts)) = body.outgoing() else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0],
            OutgoingPart::Text {
                name: "name".to_string(),
                value: "courier".to_string()
            }
        );
        assert!(matches!(&parts[1], OutgoingPart::File { name, .. } if name == "doc"));
    }

    #[test]
    fn test_no_body_sends_nothing() {
        assert_eq!(NoBody {}.outgoing(), None);
    }
}
