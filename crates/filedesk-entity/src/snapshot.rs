//! Full point-in-time view of both collections.

use serde::{Deserialize, Serialize};

use filedesk_core::types::{FileId, FolderId};

use crate::file::File;
use crate::folder::Folder;

/// The `{folders, files}` pair, also the persisted document layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All folders.
    #[serde(default)]
    pub folders: Vec<Folder>,
    /// All files.
    #[serde(default)]
    pub files: Vec<File>,
}

impl Snapshot {
    /// Whether both collections are empty.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Look up a folder by id.
    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Look up a file by id.
    pub fn file(&self, id: &FileId) -> Option<&File> {
        self.files.iter().find(|f| &f.id == id)
    }

    /// Files directly inside `folder` (`None` meaning root).
    pub fn files_in<'a>(&'a self, folder: Option<&'a FolderId>) -> impl Iterator<Item = &'a File> {
        self.files.iter().filter(move |f| f.is_in(folder))
    }

    /// Folders directly under `parent` (`None` meaning root).
    pub fn subfolders_of<'a>(
        &'a self,
        parent: Option<&'a FolderId>,
    ) -> impl Iterator<Item = &'a Folder> {
        self.folders.iter().filter(move |f| f.is_child_of(parent))
    }

    /// Every file whose folder reference points at a folder that does not exist.
    pub fn orphaned_files(&self) -> Vec<&File> {
        self.files
            .iter()
            .filter(|f| match &f.folder_id {
                Some(id) => self.folder(id).is_none(),
                None => false,
            })
            .collect()
    }
}
