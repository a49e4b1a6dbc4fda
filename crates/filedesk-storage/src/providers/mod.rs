//! Entity store implementations.

#[cfg(feature = "json")]
pub mod json;
pub mod memory;

#[cfg(feature = "json")]
pub use json::JsonFileStore;
pub use memory::MemoryStore;
