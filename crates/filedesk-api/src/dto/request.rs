//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::Dimensions;

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder; `null`, `""`, or `"root"` for top level.
    #[serde(deserialize_with = "filedesk_entity::root::deserialize", default)]
    pub parent_id: Option<FolderId>,
}

/// Rename request body, for folders and files alike.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Move folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFolderRequest {
    /// New parent folder; root when absent.
    #[serde(deserialize_with = "filedesk_entity::root::deserialize", default)]
    pub parent_id: Option<FolderId>,
}

/// Move file request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFileRequest {
    /// Target folder; root when absent.
    #[serde(deserialize_with = "filedesk_entity::root::deserialize", default)]
    pub folder_id: Option<FolderId>,
}

/// Create file (metadata only) request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub name: String,
    /// MIME type.
    #[validate(length(min = 1, max = 255, message = "MIME type is required"))]
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Target folder; root when absent.
    #[serde(deserialize_with = "filedesk_entity::root::deserialize", default)]
    pub folder_id: Option<FolderId>,
    /// Image dimensions, when known.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

/// Bulk delete request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    /// Ids to delete.
    #[validate(length(min = 1, max = 1000, message = "Provide between 1 and 1000 ids"))]
    pub ids: Vec<FileId>,
}

/// `?folder_id=` query; missing or `root` means the root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderQuery {
    /// Folder to list.
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// `?parent_id=` query; missing or `root` means the root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParentQuery {
    /// Parent whose subfolders are listed.
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// `?q=` search query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Search term.
    #[serde(default)]
    pub q: Option<String>,
}
