//! File operations.

use chrono::Utc;
use tracing::{debug, info};

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{BulkDeleteResult, CreateFile, File, root};

use super::FileManager;
use crate::naming::with_preserved_extension;

impl FileManager {
    /// Records a new file. The path is derived from the target folder.
    pub async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        let now = Utc::now();
        let folder_id = req.folder_id.filter(|id| !root::is_sentinel(id));
        let file = File {
            id: FileId::generate(),
            path: self.locations.path_for(folder_id.as_ref(), &req.name),
            name: req.name,
            mime_type: req.mime_type,
            size_bytes: req.size_bytes,
            folder_id,
            uploaded_at: now,
            updated_at: now,
            dimensions: req.dimensions,
            revision: 0,
        };

        let file = self.store.insert_file(file).await?;
        info!(
            file_id = %file.id,
            name = %file.name,
            folder_id = ?file.folder_id,
            size = file.size_bytes,
            "File created"
        );
        Ok(file)
    }

    /// Gets a file by id.
    pub async fn get_file(&self, id: &FileId) -> AppResult<File> {
        self.store
            .file(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found").with_subject(id))
    }

    /// Renames a file, keeping its extension when `new_name` has none, and
    /// re-derives its path.
    pub async fn rename_file(&self, id: &FileId, new_name: &str) -> AppResult<File> {
        let mut file = self.get_file(id).await?;
        let name = with_preserved_extension(&file.name, new_name);
        let old_name = std::mem::replace(&mut file.name, name);
        file.path = self.locations.path_for(file.folder_id.as_ref(), &file.name);
        file.updated_at = Utc::now();

        let file = self.store.update_file(file).await?;
        info!(file_id = %id, from = %old_name, to = %file.name, "File renamed");
        Ok(file)
    }

    /// Moves a file into `folder` (`None` for root) and re-derives its path.
    pub async fn move_file(&self, id: &FileId, folder: Option<&FolderId>) -> AppResult<File> {
        let folder = root::normalize(folder);
        let mut file = self.get_file(id).await?;
        if let Some(target) = folder {
            self.get_folder(target)
                .await
                .map_err(|_| AppError::not_found("Target folder not found").with_subject(target))?;
        }

        file.folder_id = folder.cloned();
        file.path = self.locations.path_for(folder, &file.name);
        file.updated_at = Utc::now();

        let file = self.store.update_file(file).await?;
        info!(file_id = %id, folder_id = ?file.folder_id, path = %file.path, "File moved");
        Ok(file)
    }

    /// Deletes a file. Unknown ids are a no-op.
    pub async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        match self.store.remove_file(id).await? {
            Some(file) => info!(file_id = %id, name = %file.name, "File deleted"),
            None => debug!(file_id = %id, "Delete of unknown file ignored"),
        }
        Ok(())
    }

    /// Deletes several files, reporting which ids were already absent.
    pub async fn delete_files(&self, ids: &[FileId]) -> AppResult<BulkDeleteResult> {
        let mut result = BulkDeleteResult::default();
        for id in ids {
            match self.store.remove_file(id).await? {
                Some(_) => result.deleted.push(id.clone()),
                None => result.missing.push(id.clone()),
            }
        }

        info!(
            deleted = result.deleted.len(),
            missing = result.missing.len(),
            "Bulk delete finished"
        );
        Ok(result)
    }

    /// Files directly inside `folder` (`None` for root).
    pub async fn list_files_in_folder(&self, folder: Option<&FolderId>) -> AppResult<Vec<File>> {
        let folder = root::normalize(folder);
        let snapshot = self.store.load().await;
        Ok(snapshot.files_in(folder).cloned().collect())
    }

    /// Public URL of a file, or `None` when the id is unknown.
    pub async fn get_public_url(&self, id: &FileId) -> AppResult<Option<String>> {
        Ok(self.store.file(id).await?.map(|f| f.path))
    }
}
