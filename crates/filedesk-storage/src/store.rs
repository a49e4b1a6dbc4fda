//! Entity store trait for pluggable folder/file persistence.

use async_trait::async_trait;

use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{File, Folder, Snapshot};

/// Keyed persistence for folders and files.
///
/// Every write is applied atomically against the whole store, so the
/// cross-entity guards below are checked and applied in one step:
///
/// - inserting or updating a file requires its folder to exist,
/// - inserting or updating a folder requires its parent to exist and must
///   not make the folder its own ancestor,
/// - removing a folder requires it to have no files and no subfolders.
///
/// Inserts assign revision 1. Updates must carry the revision currently
/// stored and get it bumped by one; anything else is a `Conflict`.
#[async_trait]
pub trait EntityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "memory", "json").
    fn provider_type(&self) -> &str;

    /// Check whether the underlying medium is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Return the current snapshot.
    ///
    /// A store that has never been written is seeded first (once). When
    /// the medium cannot be read this returns an empty snapshot instead of
    /// failing.
    async fn load(&self) -> Snapshot;

    /// Look up one folder.
    async fn folder(&self, id: &FolderId) -> AppResult<Option<Folder>>;

    /// Look up one file.
    async fn file(&self, id: &FileId) -> AppResult<Option<File>>;

    /// Store a new folder.
    async fn insert_folder(&self, folder: Folder) -> AppResult<Folder>;

    /// Replace a stored folder, checking its revision.
    async fn update_folder(&self, folder: Folder) -> AppResult<Folder>;

    /// Remove an empty folder and return it.
    async fn remove_folder(&self, id: &FolderId) -> AppResult<Folder>;

    /// Store a new file.
    async fn insert_file(&self, file: File) -> AppResult<File>;

    /// Replace a stored file, checking its revision.
    async fn update_file(&self, file: File) -> AppResult<File>;

    /// Remove a file, returning it if it existed.
    async fn remove_file(&self, id: &FileId) -> AppResult<Option<File>>;

    /// Drop all data. The next access seeds again if seeding is enabled.
    async fn reset(&self) -> AppResult<()>;
}
