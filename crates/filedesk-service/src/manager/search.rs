//! Read-only queries over the whole store.

use filedesk_core::result::AppResult;
use filedesk_entity::{File, UsageStats};

use super::FileManager;

impl FileManager {
    /// Case-insensitive substring search over file names.
    ///
    /// A missing or blank term matches nothing.
    pub async fn search_by_name(&self, term: Option<&str>) -> AppResult<Vec<File>> {
        let needle = match term.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return Ok(Vec::new()),
        };

        let snapshot = self.store.load().await;
        Ok(snapshot
            .files
            .into_iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Counts and byte totals across all folders and files.
    pub async fn usage_stats(&self) -> AppResult<UsageStats> {
        let snapshot = self.store.load().await;
        Ok(UsageStats::from_snapshot(&snapshot))
    }
}
