//! Folder to public URL prefix mapping.
//!
//! Derived file paths are `{prefix}/{name}`, where the prefix comes from a
//! declarative table keyed by folder id. Files at the root and in unmapped
//! folders get an empty prefix, i.e. `/{name}`.

use std::collections::HashMap;

use filedesk_core::config::LocationRule;
use filedesk_core::types::FolderId;

/// Resolved folder to prefix table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTable {
    prefixes: HashMap<FolderId, String>,
}

impl LocationTable {
    /// Build a table from `(folder, prefix)` pairs. Later pairs win.
    pub fn new<I, F, P>(rules: I) -> Self
    where
        I: IntoIterator<Item = (F, P)>,
        F: Into<FolderId>,
        P: AsRef<str>,
    {
        let prefixes = rules
            .into_iter()
            .map(|(folder, prefix)| (folder.into(), normalize_prefix(prefix.as_ref())))
            .collect();
        Self { prefixes }
    }

    /// Build a table from configuration rules.
    pub fn from_rules(rules: &[LocationRule]) -> Self {
        Self::new(
            rules
                .iter()
                .map(|r| (r.folder_id.as_str(), r.prefix.as_str())),
        )
    }

    /// Prefix for files in `folder`; empty for root and unmapped folders.
    pub fn prefix_for(&self, folder: Option<&FolderId>) -> &str {
        folder
            .and_then(|id| self.prefixes.get(id))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Derived public path of a file named `name` in `folder`.
    pub fn path_for(&self, folder: Option<&FolderId>, name: &str) -> String {
        format!("{}/{}", self.prefix_for(folder), name)
    }
}

/// `images/` and `/images` both become `/images`; `/` becomes empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
