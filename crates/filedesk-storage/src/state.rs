//! In-memory keyed collections shared by every store implementation.

use std::collections::HashMap;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{File, Folder, Snapshot};

/// Folders and files keyed by id, with the store invariants enforced on
/// every write.
#[derive(Debug, Clone, Default)]
pub struct KeyedState {
    folders: HashMap<FolderId, Folder>,
    files: HashMap<FileId, File>,
}

impl KeyedState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from a snapshot. Records without a revision get revision 1.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let folders = snapshot
            .folders
            .into_iter()
            .map(|mut f| {
                f.revision = f.revision.max(1);
                (f.id.clone(), f)
            })
            .collect();
        let files = snapshot
            .files
            .into_iter()
            .map(|mut f| {
                f.revision = f.revision.max(1);
                (f.id.clone(), f)
            })
            .collect();
        Self { folders, files }
    }

    /// Copy out a snapshot in creation order.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut folders: Vec<Folder> = self.folders.values().cloned().collect();
        folders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let mut files: Vec<File> = self.files.values().cloned().collect();
        files.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then_with(|| a.id.cmp(&b.id)));

        Snapshot { folders, files }
    }

    /// Whether both maps are empty.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.folders.clear();
        self.files.clear();
    }

    /// Look up one folder.
    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.get(id)
    }

    /// Look up one file.
    pub fn file(&self, id: &FileId) -> Option<&File> {
        self.files.get(id)
    }

    /// Insert a new folder with revision 1.
    pub fn insert_folder(&mut self, mut folder: Folder) -> AppResult<Folder> {
        if self.folders.contains_key(&folder.id) {
            return Err(AppError::conflict(format!("Folder id '{}' is already in use", folder.id))
                .with_subject(&folder.id));
        }
        if let Some(parent) = &folder.parent_id {
            self.require_folder(parent, "Parent folder")?;
        }
        folder.revision = 1;
        self.folders.insert(folder.id.clone(), folder.clone());
        Ok(folder)
    }

    /// Replace a folder after checking its revision, parent, and ancestry.
    pub fn update_folder(&mut self, mut folder: Folder) -> AppResult<Folder> {
        let stored = self.require_folder(&folder.id, "Folder")?;
        check_revision("Folder", folder.id.as_str(), stored.revision, folder.revision)?;

        if let Some(parent) = &folder.parent_id {
            self.require_folder(parent, "Parent folder")?;
            if self.is_ancestor_or_self(&folder.id, parent) {
                return Err(AppError::validation(format!(
                    "Folder '{}' cannot be placed inside itself or one of its descendants",
                    folder.name
                ))
                .with_subject(&folder.id));
            }
        }

        folder.revision += 1;
        self.folders.insert(folder.id.clone(), folder.clone());
        Ok(folder)
    }

    /// Remove a folder that owns no files and no subfolders.
    pub fn remove_folder(&mut self, id: &FolderId) -> AppResult<Folder> {
        let folder = self.require_folder(id, "Folder")?;

        let files = self.files.values().filter(|f| f.is_in(Some(id))).count();
        let subfolders = self
            .folders
            .values()
            .filter(|f| f.is_child_of(Some(id)))
            .count();

        if files > 0 || subfolders > 0 {
            return Err(AppError::folder_not_empty(format!(
                "Folder '{}' still contains {files} file(s) and {subfolders} subfolder(s)",
                folder.name
            ))
            .with_subject(id));
        }

        self.folders
            .remove(id)
            .ok_or_else(|| AppError::not_found("Folder not found").with_subject(id))
    }

    /// Insert a new file with revision 1.
    pub fn insert_file(&mut self, mut file: File) -> AppResult<File> {
        if self.files.contains_key(&file.id) {
            return Err(AppError::conflict(format!("File id '{}' is already in use", file.id))
                .with_subject(&file.id));
        }
        if let Some(folder) = &file.folder_id {
            self.require_folder(folder, "Target folder")?;
        }
        file.revision = 1;
        self.files.insert(file.id.clone(), file.clone());
        Ok(file)
    }

    /// Replace a file after checking its revision and folder.
    pub fn update_file(&mut self, mut file: File) -> AppResult<File> {
        let stored = self
            .files
            .get(&file.id)
            .ok_or_else(|| AppError::not_found("File not found").with_subject(&file.id))?;
        check_revision("File", file.id.as_str(), stored.revision, file.revision)?;

        if let Some(folder) = &file.folder_id {
            self.require_folder(folder, "Target folder")?;
        }

        file.revision += 1;
        self.files.insert(file.id.clone(), file.clone());
        Ok(file)
    }

    /// Remove a file if present.
    pub fn remove_file(&mut self, id: &FileId) -> Option<File> {
        self.files.remove(id)
    }

    fn require_folder(&self, id: &FolderId, what: &str) -> AppResult<&Folder> {
        self.folders
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("{what} not found")).with_subject(id))
    }

    /// Whether `candidate` is `folder` or lies beneath it.
    fn is_ancestor_or_self(&self, folder: &FolderId, candidate: &FolderId) -> bool {
        let mut current = Some(candidate);
        // Bounded by the folder count so a corrupt document cannot loop forever.
        for _ in 0..=self.folders.len() {
            match current {
                Some(id) if id == folder => return true,
                Some(id) => current = self.folders.get(id).and_then(|f| f.parent_id.as_ref()),
                None => return false,
            }
        }
        true
    }
}

fn check_revision(what: &str, id: &str, stored: u64, incoming: u64) -> AppResult<()> {
    if stored != incoming {
        return Err(AppError::conflict(format!(
            "{what} '{id}' was modified concurrently (revision {incoming}, stored {stored})"
        ))
        .with_subject(id));
    }
    Ok(())
}
