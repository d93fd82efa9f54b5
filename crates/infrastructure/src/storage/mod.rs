//! Storage backends for store records.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
