//! In-memory entity store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{File, Folder, Snapshot};

use crate::state::KeyedState;
use crate::store::EntityStore;

/// Process-local store. Data lives as long as the value.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    /// Dataset written on first access of an empty store.
    seed: Option<Snapshot>,
}

#[derive(Debug, Default)]
struct Inner {
    state: KeyedState,
    initialized: bool,
}

impl MemoryStore {
    /// Create an empty store without seed data.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            seed: None,
        }
    }

    /// Create a store that seeds `seed` on first access.
    pub fn with_seed(seed: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            seed: Some(seed),
        }
    }

    /// Create a store preloaded with `snapshot`.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: KeyedState::from_snapshot(snapshot),
                initialized: true,
            }),
            seed: None,
        }
    }

    fn ensure_seeded(&self, inner: &mut Inner) {
        if inner.initialized {
            return;
        }
        if let Some(seed) = &self.seed {
            if inner.state.is_empty() {
                debug!(
                    folders = seed.folders.len(),
                    files = seed.files.len(),
                    "Seeding empty memory store"
                );
                inner.state = KeyedState::from_snapshot(seed.clone());
            }
        }
        inner.initialized = true;
    }

    async fn read<R>(&self, f: impl FnOnce(&KeyedState) -> R) -> R {
        {
            let inner = self.inner.read().await;
            if inner.initialized {
                return f(&inner.state);
            }
        }
        let mut inner = self.inner.write().await;
        self.ensure_seeded(&mut inner);
        f(&inner.state)
    }

    async fn write<R>(&self, f: impl FnOnce(&mut KeyedState) -> R) -> R {
        let mut inner = self.inner.write().await;
        self.ensure_seeded(&mut inner);
        f(&mut inner.state)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn load(&self) -> Snapshot {
        self.read(KeyedState::to_snapshot).await
    }

    async fn folder(&self, id: &FolderId) -> AppResult<Option<Folder>> {
        Ok(self.read(|s| s.folder(id).cloned()).await)
    }

    async fn file(&self, id: &FileId) -> AppResult<Option<File>> {
        Ok(self.read(|s| s.file(id).cloned()).await)
    }

    async fn insert_folder(&self, folder: Folder) -> AppResult<Folder> {
        self.write(|s| s.insert_folder(folder)).await
    }

    async fn update_folder(&self, folder: Folder) -> AppResult<Folder> {
        self.write(|s| s.update_folder(folder)).await
    }

    async fn remove_folder(&self, id: &FolderId) -> AppResult<Folder> {
        self.write(|s| s.remove_folder(id)).await
    }

    async fn insert_file(&self, file: File) -> AppResult<File> {
        self.write(|s| s.insert_file(file)).await
    }

    async fn update_file(&self, file: File) -> AppResult<File> {
        self.write(|s| s.update_file(file)).await
    }

    async fn remove_file(&self, id: &FileId) -> AppResult<Option<File>> {
        Ok(self.write(|s| s.remove_file(id)).await)
    }

    async fn reset(&self) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.state.clear();
        inner.initialized = false;
        debug!("Memory store reset");
        Ok(())
    }
}
