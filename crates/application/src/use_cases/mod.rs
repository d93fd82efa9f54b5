//! Application use cases (business logic orchestration).

mod dispatch_request;

pub use dispatch_request::DispatchRequest;
