//! Folder listing view.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// Everything directly inside one folder (or the root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderContents {
    /// The listed folder, `None` when listing the root.
    pub folder: Option<Folder>,
    /// Direct subfolders, in creation order.
    pub folders: Vec<Folder>,
    /// Direct files, in creation order.
    pub files: Vec<File>,
}
