//! # filedesk-service
//!
//! Business logic for FileDesk:
//!
//! - [`FileManager`] is the repository: the only component that mutates
//!   the entity store, enforcing the folder/file invariants and deriving
//!   public paths.
//! - [`backend`] holds the [`FileBackend`] strategy with its local, remote,
//!   and fallback implementations, one of which is selected at startup.
//! - [`upload`] is the batch upload pipeline that optimizes images before
//!   handing each file to a backend.
//!
//! Services follow constructor injection: the store and backends are
//! provided at construction time via `Arc` references.

pub mod backend;
pub mod manager;
pub mod naming;
pub mod upload;

pub use backend::{
    FallbackBackend, FileBackend, LocalBackend, RemoteBackend, UploadRequest, build_backend,
};
pub use manager::FileManager;
pub use upload::{UploadInput, UploadObserver, UploadPipeline, UploadSummary};
