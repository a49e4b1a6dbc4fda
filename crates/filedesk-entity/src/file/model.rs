//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::types::{FileId, FolderId};

/// Pixel dimensions of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// An uploaded file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// File name including extension.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Owning folder (`None` for root-level files).
    #[serde(deserialize_with = "crate::root::deserialize", default)]
    pub folder_id: Option<FolderId>,
    /// Public location derived from the name and the folder's URL prefix.
    pub path: String,
    /// Upload time. Never changes after creation.
    pub uploaded_at: DateTime<Utc>,
    /// When the file was last renamed or moved.
    pub updated_at: DateTime<Utc>,
    /// Image dimensions, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Optimistic concurrency stamp, bumped by the store on every write.
    #[serde(default)]
    pub revision: u64,
}

impl File {
    /// Whether the MIME type denotes an image.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name).map(|ext| ext.to_lowercase())
    }

    /// Whether the file sits in `folder` (`None` meaning root).
    pub fn is_in(&self, folder: Option<&FolderId>) -> bool {
        self.folder_id.as_ref() == folder
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Target folder (`None` for root).
    #[serde(deserialize_with = "crate::root::deserialize", default)]
    pub folder_id: Option<FolderId>,
    /// Image dimensions, when known.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    /// Ids that existed and were removed.
    pub deleted: Vec<FileId>,
    /// Ids that were already absent.
    pub missing: Vec<FileId>,
}

/// Whether a MIME type denotes an image.
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Extension of a file name, without the dot.
///
/// Dotfiles such as `.env` and names ending in a dot have no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == name.len() => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}
