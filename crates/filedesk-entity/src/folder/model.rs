//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

/// A folder in the media tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Display name. Not unique among siblings.
    pub name: String,
    /// Parent folder (`None` for top-level folders).
    #[serde(with = "crate::root", default)]
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or moved.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency stamp, bumped by the store on every write.
    #[serde(default)]
    pub revision: u64,
}

impl Folder {
    /// Build a new, not yet stored folder with a generated id.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::generate(),
            name: name.into(),
            parent_id,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Check if this is a top-level folder.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether `parent` is this folder's parent (`None` meaning root).
    pub fn is_child_of(&self, parent: Option<&FolderId>) -> bool {
        self.parent_id.as_ref() == parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_parent_serializes_as_sentinel() {
        let folder = Folder::new("Imagens", None);
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["parent_id"], "root");

        let back: Folder = serde_json::from_value(json).unwrap();
        assert!(back.is_root());
    }

    #[test]
    fn test_null_parent_is_accepted() {
        let json = serde_json::json!({
            "id": "blog",
            "name": "Blog",
            "parent_id": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        });
        let folder: Folder = serde_json::from_value(json).unwrap();
        assert!(folder.is_root());
        assert_eq!(folder.revision, 0);
    }

    #[test]
    fn test_is_child_of() {
        let parent = FolderId::from("images");
        let folder = Folder::new("Blog", Some(parent.clone()));
        assert!(folder.is_child_of(Some(&parent)));
        assert!(!folder.is_child_of(None));
    }
}
