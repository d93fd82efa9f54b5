//! HTTP request form types

mod body;
mod form;
mod method;
mod prepared;
mod row;

pub use body::{
    BodyType, FileAttachment, FormBody, FormDataEntry, FormDataKind, FormDataValue, NoBody,
    OutgoingBody, OutgoingPart, RequestBody,
};
pub use form::{HttpFormState, RequestFormState};
pub use method::HttpMethod;
pub use prepared::PreparedRequest;
pub use row::{KeyValueRow, active_rows};
