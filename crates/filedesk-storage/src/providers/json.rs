//! JSON document entity store.
//!
//! Both collections are persisted as one document `{folders, files}` in
//! `<data_root>/<namespace>.json`. The document is read on first access,
//! and again on later accesses while it cannot be read. Once loaded the
//! keyed in-memory state is authoritative and every successful write is
//! flushed with a write-to-temp-then-rename so a crash never leaves a
//! half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{File, Folder, Snapshot};

use crate::state::KeyedState;
use crate::store::EntityStore;

/// Store persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Directory holding the document.
    root: PathBuf,
    /// Full path of the document.
    path: PathBuf,
    /// Dataset written when the document does not exist yet.
    seed: Option<Snapshot>,
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: KeyedState,
    loaded: bool,
    /// Cleared when the document exists but cannot be read or parsed, so it
    /// is not overwritten with an empty dataset.
    writable: bool,
}

impl JsonFileStore {
    /// Create a store for `<root>/<namespace>.json`. No I/O happens until
    /// first access.
    pub fn new(root: impl Into<PathBuf>, namespace: &str, seed: Option<Snapshot>) -> Self {
        let root = root.into();
        let path = root.join(format!("{namespace}.json"));
        Self {
            root,
            path,
            seed,
            inner: RwLock::new(Inner {
                state: KeyedState::new(),
                loaded: false,
                writable: true,
            }),
        }
    }

    /// Path of the persisted document.
    pub fn document_path(&self) -> &Path {
        &self.path
    }

    async fn ensure_loaded(&self, inner: &mut Inner) {
        if inner.loaded {
            return;
        }
        inner.loaded = true;

        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) => {
                    debug!(
                        path = %self.path.display(),
                        folders = snapshot.folders.len(),
                        files = snapshot.files.len(),
                        "Loaded store document"
                    );
                    inner.state = KeyedState::from_snapshot(snapshot);
                    inner.writable = true;
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Store document is unreadable, serving an empty snapshot"
                    );
                    inner.state = KeyedState::new();
                    inner.writable = false;
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                inner.writable = true;
                if let Some(seed) = &self.seed {
                    let seeded = KeyedState::from_snapshot(seed.clone());
                    match self.persist(&seeded).await {
                        Ok(()) => info!(path = %self.path.display(), "Seeded new store document"),
                        Err(e) => warn!(error = %e, "Failed to persist seed data"),
                    }
                    inner.state = seeded;
                }
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Store medium unavailable, serving an empty snapshot"
                );
                inner.state = KeyedState::new();
                inner.writable = false;
                // Retry the read on next access.
                inner.loaded = false;
            }
        }
    }

    async fn persist(&self, state: &KeyedState) -> AppResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data directory: {}", self.root.display()),
                e,
            )
        })?;

        let body = serde_json::to_vec_pretty(&state.to_snapshot())?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, &body).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write store document: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace store document: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), bytes = body.len(), "Wrote store document");
        Ok(())
    }

    async fn read<R>(&self, f: impl FnOnce(&KeyedState) -> R) -> R {
        {
            let inner = self.inner.read().await;
            if inner.loaded {
                return f(&inner.state);
            }
        }
        let mut inner = self.inner.write().await;
        self.ensure_loaded(&mut inner).await;
        f(&inner.state)
    }

    /// Apply `f` to a copy of the state, persist the copy, then swap it in.
    /// The in-memory state only changes if the document was written.
    async fn mutate<R>(&self, f: impl FnOnce(&mut KeyedState) -> AppResult<R>) -> AppResult<R> {
        let mut inner = self.inner.write().await;
        self.ensure_loaded(&mut inner).await;

        if !inner.writable {
            return Err(AppError::storage(format!(
                "Store document {} is unreadable; refusing to overwrite it",
                self.path.display()
            )));
        }

        let mut next = inner.state.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        inner.state = next;
        Ok(out)
    }
}

#[async_trait]
impl EntityStore for JsonFileStore {
    fn provider_type(&self) -> &str {
        "json"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::create_dir_all(&self.root).await.is_ok())
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
        self.mutate(|s| s.insert_folder(folder)).await
    }

    async fn update_folder(&self, folder: Folder) -> AppResult<Folder> {
        self.mutate(|s| s.update_folder(folder)).await
    }

    async fn remove_folder(&self, id: &FolderId) -> AppResult<Folder> {
        self.mutate(|s| s.remove_folder(id)).await
    }

    async fn insert_file(&self, file: File) -> AppResult<File> {
        self.mutate(|s| s.insert_file(file)).await
    }

    async fn update_file(&self, file: File) -> AppResult<File> {
        self.mutate(|s| s.update_file(file)).await
    }

    async fn remove_file(&self, id: &FileId) -> AppResult<Option<File>> {
        if self.read(|s| s.file(id).is_none()).await {
            return Ok(None);
        }
        self.mutate(|s| Ok(s.remove_file(id))).await
    }

    async fn reset(&self) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove store document: {}", self.path.display()),
                    e,
                ));
            }
        }
        inner.state = KeyedState::new();
        inner.loaded = false;
        inner.writable = true;
        debug!(path = %self.path.display(), "JSON store reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_snapshot;
    use filedesk_entity::LocationTable;

    fn seed() -> Snapshot {
        default_snapshot(&LocationTable::new([("images", "/images"), ("documents", "/documents")]))
    }

    #[tokio::test]
    async fn test_seeds_and_persists_new_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));

        let snapshot = store.load().await;
        assert_eq!(snapshot.folders.len(), 3);
        assert!(store.document_path().exists());

        let raw = std::fs::read_to_string(store.document_path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc["folders"].is_array());
        assert!(doc["files"].is_array());
    }

    #[tokio::test]
    async fn test_seed_is_not_reapplied_after_deletes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
            store.remove_file(&FileId::from("seed-logo")).await.unwrap();
        }

        let reopened = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
        let snapshot = reopened.load().await;
        assert!(snapshot.file(&FileId::from("seed-logo")).is_none());
        assert_eq!(snapshot.files.len(), seed().files.len() - 1);
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), "filedesk.test", None);
        let folder = store.insert_folder(Folder::new("Imagens", None)).await.unwrap();

        let reopened = JsonFileStore::new(dir.path(), "filedesk.test", None);
        let loaded = reopened.folder(&folder.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Imagens");
        assert_eq!(loaded.revision, 1);
    }

    #[tokio::test]
    async fn test_corrupt_document_loads_empty_and_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filedesk.test.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
        assert!(store.load().await.is_empty());

        let err = store
            .insert_folder(Folder::new("Imagens", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_document_is_not_overwritten_and_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filedesk.test.json");
        {
            let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
            assert_eq!(store.load().await.files.len(), seed().files.len());
        }
        let saved = dir.path().join("saved.json");
        std::fs::rename(&path, &saved).unwrap();
        std::os::unix::fs::symlink(&path, &path).unwrap();

        let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
        assert!(store.load().await.is_empty());

        let err = store
            .insert_folder(Folder::new("Imagens", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(std::fs::symlink_metadata(&path).unwrap().file_type().is_symlink());

        std::fs::remove_file(&path).unwrap();
        std::fs::rename(&saved, &path).unwrap();
        assert_eq!(store.load().await.files.len(), seed().files.len());
        store.insert_folder(Folder::new("Imagens", None)).await.unwrap();
        assert_eq!(store.load().await.folders.len(), seed().folders.len() + 1);
    }

    #[tokio::test]
    async fn test_failed_guard_does_not_touch_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), "filedesk.test", Some(seed()));
        store.load().await;
        let before = std::fs::read(store.document_path()).unwrap();

        let err = store
            .remove_folder(&FolderId::from("documents"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::FolderNotEmpty);
        assert_eq!(std::fs::read(store.document_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_reset_removes_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), "filedesk.test", None);
        store.insert_folder(Folder::new("Imagens", None)).await.unwrap();

        store.reset().await.unwrap();
        assert!(!store.document_path().exists());
        assert!(store.load().await.is_empty());
    }
}
