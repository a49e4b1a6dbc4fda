//! Retry-once-locally decorator.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{BulkDeleteResult, CreateFile, File, Folder, FolderContents, UsageStats};

use super::{FileBackend, UploadRequest};

/// Wraps a primary backend and repeats a call on `fallback` when the
/// primary fails with `BackendUnavailable`.
///
/// The retry happens at most once per call and only for that error kind;
/// every other error reaches the caller unchanged. Binary uploads are never
/// replayed, since the fallback would record metadata for content it never
/// stored.
#[derive(Debug)]
pub struct FallbackBackend {
    primary: Arc<dyn FileBackend>,
    fallback: Arc<dyn FileBackend>,
    label: String,
}

impl FallbackBackend {
    /// Creates the decorator.
    pub fn new(primary: Arc<dyn FileBackend>, fallback: Arc<dyn FileBackend>) -> Self {
        let label = format!("{}+{}", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            label,
        }
    }

    async fn with_fallback<T, P, F, Fut>(&self, operation: &str, primary: P, fallback: F) -> AppResult<T>
    where
        P: Future<Output = AppResult<T>> + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
        T: Send,
    {
        match primary.await {
            Err(err) if err.is_backend_unavailable() => {
                warn!(
                    operation,
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "Primary backend unavailable, retrying on fallback"
                );
                fallback().await
            }
            other => other,
        }
    }
}

#[async_trait]
impl FileBackend for FallbackBackend {
    fn name(&self) -> &str {
        &self.label
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&FolderId>) -> AppResult<Folder> {
        self.with_fallback(
            "create_folder",
            self.primary.create_folder(name, parent_id),
            || self.fallback.create_folder(name, parent_id),
        )
        .await
    }

    async fn get_folder(&self, id: &FolderId) -> AppResult<Folder> {
        self.with_fallback("get_folder", self.primary.get_folder(id), || {
            self.fallback.get_folder(id)
        })
        .await
    }

    async fn rename_folder(&self, id: &FolderId, new_name: &str) -> AppResult<Folder> {
        self.with_fallback(
            "rename_folder",
            self.primary.rename_folder(id, new_name),
            || self.fallback.rename_folder(id, new_name),
        )
        .await
    }

    async fn move_folder(&self, id: &FolderId, new_parent: Option<&FolderId>) -> AppResult<Folder> {
        self.with_fallback(
            "move_folder",
            self.primary.move_folder(id, new_parent),
            || self.fallback.move_folder(id, new_parent),
        )
        .await
    }

    async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        self.with_fallback("delete_folder", self.primary.delete_folder(id), || {
            self.fallback.delete_folder(id)
        })
        .await
    }

    async fn list_subfolders(&self, parent: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        self.with_fallback(
            "list_subfolders",
            self.primary.list_subfolders(parent),
            || self.fallback.list_subfolders(parent),
        )
        .await
    }

    async fn list_contents(&self, folder: Option<&FolderId>) -> AppResult<FolderContents> {
        self.with_fallback(
            "list_contents",
            self.primary.list_contents(folder),
            || self.fallback.list_contents(folder),
        )
        .await
    }

    async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        let retry = req.clone();
        self.with_fallback("create_file", self.primary.create_file(req), || {
            self.fallback.create_file(retry)
        })
        .await
    }

    async fn upload_file(&self, req: UploadRequest) -> AppResult<File> {
        let name = req.name.clone();
        self.primary.upload_file(req).await.inspect_err(|err| {
            if err.is_backend_unavailable() {
                error!(
                    file = %name,
                    primary = self.primary.name(),
                    error = %err,
                    "Upload failed on primary backend; binary uploads are not replayed"
                );
            }
        })
    }

    async fn get_file(&self, id: &FileId) -> AppResult<File> {
        self.with_fallback("get_file", self.primary.get_file(id), || {
            self.fallback.get_file(id)
        })
        .await
    }

    async fn rename_file(&self, id: &FileId, new_name: &str) -> AppResult<File> {
        self.with_fallback(
            "rename_file",
            self.primary.rename_file(id, new_name),
            || self.fallback.rename_file(id, new_name),
        )
        .await
    }

    async fn move_file(&self, id: &FileId, folder: Option<&FolderId>) -> AppResult<File> {
        self.with_fallback(
            "move_file",
            self.primary.move_file(id, folder),
            || self.fallback.move_file(id, folder),
        )
        .await
    }

    async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        self.with_fallback("delete_file", self.primary.delete_file(id), || {
            self.fallback.delete_file(id)
        })
        .await
    }

    async fn delete_files(&self, ids: &[FileId]) -> AppResult<BulkDeleteResult> {
        self.with_fallback("delete_files", self.primary.delete_files(ids), || {
            self.fallback.delete_files(ids)
        })
        .await
    }

    async fn list_files_in_folder(&self, folder: Option<&FolderId>) -> AppResult<Vec<File>> {
        self.with_fallback(
            "list_files_in_folder",
            self.primary.list_files_in_folder(folder),
            || self.fallback.list_files_in_folder(folder),
        )
        .await
    }

    async fn search_by_name(&self, term: Option<&str>) -> AppResult<Vec<File>> {
        self.with_fallback(
            "search_by_name",
            self.primary.search_by_name(term),
            || self.fallback.search_by_name(term),
        )
        .await
    }

    async fn get_public_url(&self, id: &FileId) -> AppResult<Option<String>> {
        self.with_fallback(
            "get_public_url",
            self.primary.get_public_url(id),
            || self.fallback.get_public_url(id),
        )
        .await
    }

    async fn usage_stats(&self) -> AppResult<UsageStats> {
        self.with_fallback("usage_stats", self.primary.usage_stats(), || {
            self.fallback.usage_stats()
        })
        .await
    }
}
