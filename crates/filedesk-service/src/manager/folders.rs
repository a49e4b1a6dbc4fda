//! Folder operations.

use chrono::Utc;
use tracing::info;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::types::FolderId;
use filedesk_entity::{Folder, FolderContents, root};

use super::FileManager;

impl FileManager {
    /// Creates a folder under `parent_id` (`None` for root).
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> AppResult<Folder> {
        let parent_id = root::normalize(parent_id);
        let folder = self
            .store
            .insert_folder(Folder::new(name, parent_id.cloned()))
            .await?;

        info!(
            folder_id = %folder.id,
            name = %folder.name,
            parent_id = ?folder.parent_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Gets a folder by id.
    pub async fn get_folder(&self, id: &FolderId) -> AppResult<Folder> {
        self.store
            .folder(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found").with_subject(id))
    }

    /// Renames a folder. Derived file paths depend on folder ids, not
    /// names, so nothing else changes.
    pub async fn rename_folder(&self, id: &FolderId, new_name: &str) -> AppResult<Folder> {
        let mut folder = self.get_folder(id).await?;
        let old_name = std::mem::replace(&mut folder.name, new_name.to_string());
        folder.updated_at = Utc::now();

        let folder = self.store.update_folder(folder).await?;
        info!(folder_id = %id, from = %old_name, to = %folder.name, "Folder renamed");
        Ok(folder)
    }

    /// Moves a folder under `new_parent` (`None` for root).
    ///
    /// Moving a folder into itself or one of its descendants is a
    /// validation error.
    pub async fn move_folder(
        &self,
        id: &FolderId,
        new_parent: Option<&FolderId>,
    ) -> AppResult<Folder> {
        let mut folder = self.get_folder(id).await?;
        folder.parent_id = root::normalize(new_parent).cloned();
        folder.updated_at = Utc::now();

        let folder = self.store.update_folder(folder).await?;
        info!(folder_id = %id, parent_id = ?folder.parent_id, "Folder moved");
        Ok(folder)
    }

    /// Deletes an empty folder.
    ///
    /// Fails with `NotFound` for unknown ids and `FolderNotEmpty` when the
    /// folder still owns files or subfolders; the store is unchanged then.
    pub async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        let removed = self.store.remove_folder(id).await?;
        info!(folder_id = %id, name = %removed.name, "Folder deleted");
        Ok(())
    }

    /// Direct subfolders of `parent` (`None` for top-level folders).
    pub async fn list_subfolders(&self, parent: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        let parent = root::normalize(parent);
        let snapshot = self.store.load().await;
        Ok(snapshot.subfolders_of(parent).cloned().collect())
    }

    /// A folder together with its direct subfolders and files.
    pub async fn list_contents(&self, folder: Option<&FolderId>) -> AppResult<FolderContents> {
        let folder = root::normalize(folder);
        let snapshot = self.store.load().await;
        let current = match folder {
            Some(id) => Some(
                snapshot
                    .folder(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found("Folder not found").with_subject(id))?,
            ),
            None => None,
        };

        Ok(FolderContents {
            folder: current,
            folders: snapshot.subfolders_of(folder).cloned().collect(),
            files: snapshot.files_in(folder).cloned().collect(),
        })
    }
}
