//! Deterministic JSON serialization for store records.
//!
//! Records written by the file storage diff cleanly:
//! - Fields in declaration order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
