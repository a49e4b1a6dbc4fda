//! # filedesk-entity
//!
//! Domain entity models for FileDesk. Every struct in this crate is either
//! a stored record (`Folder`, `File`), the request data used to create one,
//! or a read-only view assembled from the store (`Snapshot`,
//! `FolderContents`, `UsageStats`).

pub mod file;
pub mod folder;
pub mod location;
pub mod root;
pub mod snapshot;
pub mod stats;

pub use file::{BulkDeleteResult, CreateFile, Dimensions, File};
pub use folder::{Folder, FolderContents};
pub use location::LocationTable;
pub use snapshot::Snapshot;
pub use stats::UsageStats;
