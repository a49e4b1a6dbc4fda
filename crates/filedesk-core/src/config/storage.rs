//! Entity store configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation: `"memory"` or `"json"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory holding the JSON document.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Namespaced key the document is stored under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Whether an empty store is seeded with the default dataset.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Folder to public URL prefix table used for derived file paths.
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationRule>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            data_root: default_data_root(),
            namespace: default_namespace(),
            seed_defaults: true,
            locations: default_locations(),
        }
    }
}

/// Maps files in one folder to a public URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRule {
    /// Folder identifier.
    pub folder_id: String,
    /// URL prefix, e.g. `/images`.
    pub prefix: String,
}

impl LocationRule {
    /// Convenience constructor.
    pub fn new(folder_id: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            prefix: prefix.into(),
        }
    }
}

fn default_provider() -> String {
    "json".to_string()
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_namespace() -> String {
    "filedesk.file-manager".to_string()
}

fn default_true() -> bool {
    true
}

fn default_locations() -> Vec<LocationRule> {
    vec![
        LocationRule::new("images", "/images"),
        LocationRule::new("documents", "/documents"),
    ]
}
