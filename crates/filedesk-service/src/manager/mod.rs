//! The file/folder repository.
//!
//! [`FileManager`] is the single writer over an [`EntityStore`]. Folder
//! operations live in [`folders`], file operations in [`files`], and
//! read-only queries in [`search`].

pub mod files;
pub mod folders;
pub mod search;

use std::sync::Arc;

use filedesk_core::config::StorageConfig;
use filedesk_core::result::AppResult;
use filedesk_entity::LocationTable;
use filedesk_storage::EntityStore;

/// Repository enforcing the folder/file invariants and deriving paths.
#[derive(Debug, Clone)]
pub struct FileManager {
    /// Entity store.
    store: Arc<dyn EntityStore>,
    /// Folder to public URL prefix table.
    locations: LocationTable,
}

impl FileManager {
    /// Creates a new file manager over `store`.
    pub fn new(store: Arc<dyn EntityStore>, locations: LocationTable) -> Self {
        Self { store, locations }
    }

    /// Opens the store named by `config` and wraps it.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store = filedesk_storage::open_store(config)?;
        Ok(Self::new(store, LocationTable::from_rules(&config.locations)))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }
}
