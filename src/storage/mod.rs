//! Key-value stores standing in for the host's local storage

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
