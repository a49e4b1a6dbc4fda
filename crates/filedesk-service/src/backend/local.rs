//! In-process backend over the repository.

use std::sync::Arc;

use async_trait::async_trait;

use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{BulkDeleteResult, CreateFile, File, Folder, FolderContents, UsageStats};

use super::{FileBackend, UploadRequest};
use crate::manager::FileManager;

/// Backend that calls the local [`FileManager`] directly.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    manager: Arc<FileManager>,
}

impl LocalBackend {
    /// Creates a local backend.
    pub fn new(manager: Arc<FileManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl FileBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&FolderId>) -> AppResult<Folder> {
        self.manager.create_folder(name, parent_id).await
    }

    async fn get_folder(&self, id: &FolderId) -> AppResult<Folder> {
        self.manager.get_folder(id).await
    }

    async fn rename_folder(&self, id: &FolderId, new_name: &str) -> AppResult<Folder> {
        self.manager.rename_folder(id, new_name).await
    }

    async fn move_folder(&self, id: &FolderId, new_parent: Option<&FolderId>) -> AppResult<Folder> {
        self.manager.move_folder(id, new_parent).await
    }

    async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        self.manager.delete_folder(id).await
    }

    async fn list_subfolders(&self, parent: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        self.manager.list_subfolders(parent).await
    }

    async fn list_contents(&self, folder: Option<&FolderId>) -> AppResult<FolderContents> {
        self.manager.list_contents(folder).await
    }

    async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        self.manager.create_file(req).await
    }

    async fn upload_file(&self, req: UploadRequest) -> AppResult<File> {
        self.manager.create_file(req.to_create_file()).await
    }

    async fn get_file(&self, id: &FileId) -> AppResult<File> {
        self.manager.get_file(id).await
    }

    async fn rename_file(&self, id: &FileId, new_name: &str) -> AppResult<File> {
        self.manager.rename_file(id, new_name).await
    }

    async fn move_file(&self, id: &FileId, folder: Option<&FolderId>) -> AppResult<File> {
        self.manager.move_file(id, folder).await
    }

    async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        self.manager.delete_file(id).await
    }

    async fn delete_files(&self, ids: &[FileId]) -> AppResult<BulkDeleteResult> {
        self.manager.delete_files(ids).await
    }

    async fn list_files_in_folder(&self, folder: Option<&FolderId>) -> AppResult<Vec<File>> {
        self.manager.list_files_in_folder(folder).await
    }

    async fn search_by_name(&self, term: Option<&str>) -> AppResult<Vec<File>> {
        self.manager.search_by_name(term).await
    }

    async fn get_public_url(&self, id: &FileId) -> AppResult<Option<String>> {
        self.manager.get_public_url(id).await
    }

    async fn usage_stats(&self) -> AppResult<UsageStats> {
        self.manager.usage_stats().await
    }
}
