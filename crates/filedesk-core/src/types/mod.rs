//! Core type definitions used across the FileDesk workspace.

pub mod id;

pub use id::{FileId, FolderId};
