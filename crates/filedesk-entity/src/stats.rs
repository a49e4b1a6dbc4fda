//! Usage statistics view.

use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of folders.
    pub folder_count: u64,
    /// Number of files.
    pub file_count: u64,
    /// Sum of all file sizes.
    pub total_bytes: u64,
    /// Number of image files.
    pub image_count: u64,
    /// Bytes taken by image files.
    pub image_bytes: u64,
    /// Number of non-image files.
    pub document_count: u64,
    /// Bytes taken by non-image files.
    pub document_bytes: u64,
}

impl UsageStats {
    /// Compute statistics from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut stats = Self {
            folder_count: snapshot.folders.len() as u64,
            ..Self::default()
        };
        for file in &snapshot.files {
            stats.file_count += 1;
            stats.total_bytes += file.size_bytes;
            if file.is_image() {
                stats.image_count += 1;
                stats.image_bytes += file.size_bytes;
            } else {
                stats.document_count += 1;
                stats.document_bytes += file.size_bytes;
            }
        }
        stats
    }
}
