//! # filedesk-storage
//!
//! Entity store implementations for FileDesk. Folders and files are kept
//! in maps keyed by id, each record carrying a revision stamp. Writes to one
//! entity never touch another, and a write carrying a stale revision is
//! rejected instead of overwriting a newer record.

pub mod manager;
pub mod providers;
pub mod seed;
pub mod state;
pub mod store;

pub use manager::open_store;
pub use providers::MemoryStore;
#[cfg(feature = "json")]
pub use providers::JsonFileStore;
pub use store::EntityStore;
