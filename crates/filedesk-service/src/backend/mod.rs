//! Backend strategy used by the upload pipeline and the CLI.
//!
//! A [`FileBackend`] exposes every file-manager operation. Three
//! implementations exist:
//!
//! - [`LocalBackend`] calls the in-process [`FileManager`],
//! - [`RemoteBackend`] calls the HTTP API of another instance,
//! - [`FallbackBackend`] tries a primary backend and repeats the call on a
//!   fallback when the primary reports `BackendUnavailable`.
//!
//! [`build_backend`] picks one from configuration at startup.

pub mod fallback;
pub mod local;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use filedesk_core::config::{BackendConfig, BackendMode};
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{
    BulkDeleteResult, CreateFile, Dimensions, File, Folder, FolderContents, UsageStats,
};

use crate::manager::FileManager;

pub use fallback::FallbackBackend;
pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// A file ready to be recorded by a backend.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name.
    pub name: String,
    /// MIME type of `data`.
    pub mime_type: String,
    /// Target folder (`None` for root).
    pub folder_id: Option<FolderId>,
    /// File content, possibly already optimized.
    pub data: Bytes,
    /// Image dimensions, when known.
    pub dimensions: Option<Dimensions>,
}

impl UploadRequest {
    /// Metadata for the record this upload produces.
    pub fn to_create_file(&self) -> CreateFile {
        CreateFile {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.data.len() as u64,
            folder_id: self.folder_id.clone(),
            dimensions: self.dimensions,
        }
    }
}

/// Every file-manager operation, independent of where it runs.
#[async_trait]
pub trait FileBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name for logs ("local", "remote", ...).
    fn name(&self) -> &str;

    /// Create a folder.
    async fn create_folder(&self, name: &str, parent_id: Option<&FolderId>) -> AppResult<Folder>;

    /// Get one folder.
    async fn get_folder(&self, id: &FolderId) -> AppResult<Folder>;

    /// Rename a folder.
    async fn rename_folder(&self, id: &FolderId, new_name: &str) -> AppResult<Folder>;

    /// Move a folder under a new parent.
    async fn move_folder(&self, id: &FolderId, new_parent: Option<&FolderId>) -> AppResult<Folder>;

    /// Delete an empty folder.
    async fn delete_folder(&self, id: &FolderId) -> AppResult<()>;

    /// Direct subfolders of a folder.
    async fn list_subfolders(&self, parent: Option<&FolderId>) -> AppResult<Vec<Folder>>;

    /// A folder with its direct subfolders and files.
    async fn list_contents(&self, folder: Option<&FolderId>) -> AppResult<FolderContents>;

    /// Record file metadata without content.
    async fn create_file(&self, req: CreateFile) -> AppResult<File>;

    /// Record a file from its content.
    async fn upload_file(&self, req: UploadRequest) -> AppResult<File>;

    /// Get one file.
    async fn get_file(&self, id: &FileId) -> AppResult<File>;

    /// Rename a file.
    async fn rename_file(&self, id: &FileId, new_name: &str) -> AppResult<File>;

    /// Move a file into another folder.
    async fn move_file(&self, id: &FileId, folder: Option<&FolderId>) -> AppResult<File>;

    /// Delete a file; unknown ids are a no-op.
    async fn delete_file(&self, id: &FileId) -> AppResult<()>;

    /// Delete several files.
    async fn delete_files(&self, ids: &[FileId]) -> AppResult<BulkDeleteResult>;

    /// Direct files of a folder.
    async fn list_files_in_folder(&self, folder: Option<&FolderId>) -> AppResult<Vec<File>>;

    /// Case-insensitive name search.
    async fn search_by_name(&self, term: Option<&str>) -> AppResult<Vec<File>>;

    /// Public URL of a file, if it exists.
    async fn get_public_url(&self, id: &FileId) -> AppResult<Option<String>>;

    /// Usage statistics.
    async fn usage_stats(&self) -> AppResult<UsageStats>;
}

/// Select the backend named by `config`.
///
/// `local` is always the in-process repository; in remote mode it is the
/// fallback target when `fallback_to_local` is set.
pub fn build_backend(
    config: &BackendConfig,
    local: Arc<FileManager>,
) -> AppResult<Arc<dyn FileBackend>> {
    let backend: Arc<dyn FileBackend> = match config.mode {
        BackendMode::Local => Arc::new(LocalBackend::new(local)),
        BackendMode::Remote => {
            let remote = Arc::new(RemoteBackend::from_config(config)?);
            if config.fallback_to_local {
                Arc::new(FallbackBackend::new(remote, Arc::new(LocalBackend::new(local))))
            } else {
                remote
            }
        }
    };

    info!(backend = backend.name(), "File backend selected");
    Ok(backend)
}
