//! Integration tests for the remote and fallback backends against a live
//! server.

mod helpers;

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use filedesk_core::config::{AppConfig, BackendConfig, BackendMode};
use filedesk_core::error::ErrorKind;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{CreateFile, Dimensions};
use filedesk_service::upload::{ImageOptimizer, NoopObserver, OptimizerSettings};
use filedesk_service::{
    FallbackBackend, FileBackend, LocalBackend, RemoteBackend, UploadInput, UploadPipeline,
    UploadRequest, build_backend,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn remote(base_url: &str, token: Option<&str>) -> RemoteBackend {
    RemoteBackend::new(base_url, token.map(str::to_string), TIMEOUT).unwrap()
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_remote_folder_lifecycle() {
    let server = helpers::spawn_server(Some("t0ken")).await;
    let backend = remote(&server.base_url, Some("t0ken"));

    let folder = backend.create_folder("Eventos", None).await.unwrap();
    assert!(folder.parent_id.is_none());

    let renamed = backend.rename_folder(&folder.id, "Eventos 2024").await.unwrap();
    assert_eq!(renamed.name, "Eventos 2024");

    let moved = backend
        .move_folder(&folder.id, Some(&FolderId::from("images")))
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(FolderId::from("images")));

    let children = backend
        .list_subfolders(Some(&FolderId::from("images")))
        .await
        .unwrap();
    assert_eq!(children.len(), 2);

    backend.delete_folder(&folder.id).await.unwrap();
    let err = backend.get_folder(&folder.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert!(server.manager.store().folder(&folder.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_remote_error_kinds_survive_the_wire() {
    let server = helpers::spawn_server(None).await;
    let backend = remote(&server.base_url, None);

    let err = backend
        .delete_folder(&FolderId::from("documents"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::FolderNotEmpty);
    assert_eq!(err.subject.as_deref(), Some("documents"));

    let err = backend
        .move_folder(&FolderId::from("images"), Some(&FolderId::from("blog")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = backend.get_file(&FileId::from("ghost")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_remote_rejects_wrong_token() {
    let server = helpers::spawn_server(Some("t0ken")).await;

    let err = remote(&server.base_url, Some("wrong"))
        .list_contents(None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = remote(&server.base_url, None)
        .usage_stats()
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_remote_file_operations() {
    let server = helpers::spawn_server(None).await;
    let backend = remote(&server.base_url, None);

    let file = backend
        .create_file(CreateFile {
            name: "old.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1024,
            folder_id: Some(FolderId::from("documents")),
            dimensions: None,
        })
        .await
        .unwrap();
    assert_eq!(file.path, "/documents/old.pdf");

    let renamed = backend.rename_file(&file.id, "report").await.unwrap();
    assert_eq!(renamed.name, "report.pdf");
    assert_eq!(
        backend.get_public_url(&file.id).await.unwrap().as_deref(),
        Some("/documents/report.pdf")
    );

    let moved = backend.move_file(&file.id, None).await.unwrap();
    assert_eq!(moved.path, "/report.pdf");

    let hits = backend.search_by_name(Some("REPORT")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(backend.search_by_name(None).await.unwrap().is_empty());
    assert!(backend.search_by_name(Some("   ")).await.unwrap().is_empty());

    backend.delete_file(&FileId::from("ghost")).await.unwrap();
    let result = backend
        .delete_files(&[file.id.clone(), FileId::from("ghost")])
        .await
        .unwrap();
    assert_eq!(result.deleted, vec![file.id.clone()]);
    assert_eq!(result.missing, vec![FileId::from("ghost")]);

    assert_eq!(backend.get_public_url(&file.id).await.unwrap(), None);

    let stats = backend.usage_stats().await.unwrap();
    assert_eq!(stats.file_count, 6);
}

#[tokio::test]
async fn test_upload_pipeline_over_remote_resizes_large_photo() {
    let server = helpers::spawn_server(None).await;
    let backend: Arc<dyn FileBackend> = Arc::new(remote(&server.base_url, None));
    let pipeline = UploadPipeline::new(
        backend,
        ImageOptimizer::new(OptimizerSettings {
            enabled: true,
            max_width: 1920,
            max_height: 1920,
            quality: 85,
            max_bytes: 5 * 1_048_576,
            fallback_quality: 60,
        }),
    );

    let inputs = vec![
        UploadInput::new("fachada.jpg", "image/jpeg", jpeg(2000, 1500)),
        UploadInput::new("contrato.pdf", "application/pdf", b"%PDF-1.4 contrato".to_vec()),
    ];
    let summary = pipeline
        .run(Some(&FolderId::from("images")), inputs, &NoopObserver)
        .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);

    let photo = summary.results[0].file.as_ref().unwrap();
    assert_eq!(photo.dimensions, Some(Dimensions { width: 1920, height: 1440 }));
    assert_eq!(photo.size_bytes, summary.results[0].uploaded_bytes);
    assert_eq!(photo.path, "/images/fachada.jpg");

    let pdf = summary.results[1].file.as_ref().unwrap();
    assert_eq!(pdf.size_bytes, 17);
    assert!(pdf.dimensions.is_none());
    assert!(!summary.results[1].optimized);

    let stored = server.manager.get_file(&photo.id).await.unwrap();
    assert_eq!(stored.dimensions, photo.dimensions);
}

#[tokio::test]
async fn test_root_id_means_the_same_locally_and_remotely() {
    let server = helpers::spawn_server(None).await;
    let remote = remote(&server.base_url, None);
    let local = LocalBackend::new(helpers::seeded_manager(&AppConfig::default()));
    let root_id = FolderId::from("root");

    let over_wire = remote.list_contents(Some(&root_id)).await.unwrap();
    let in_process = local.list_contents(Some(&root_id)).await.unwrap();
    assert_eq!(over_wire.folders.len(), in_process.folders.len());
    assert_eq!(over_wire.files.len(), in_process.files.len());
    assert_eq!(in_process.files.len(), 1);

    let remote_folder = remote.create_folder("Eventos", Some(&root_id)).await.unwrap();
    let local_folder = local.create_folder("Eventos", Some(&root_id)).await.unwrap();
    assert!(remote_folder.parent_id.is_none());
    assert!(local_folder.parent_id.is_none());

    let remote_files = remote.list_files_in_folder(Some(&root_id)).await.unwrap();
    let local_files = local.list_files_in_folder(Some(&root_id)).await.unwrap();
    assert_eq!(remote_files.len(), local_files.len());
}

#[tokio::test]
async fn test_fallback_serves_reads_from_local_when_remote_is_down() {
    let dead = helpers::dead_address().await;
    let local_manager = helpers::seeded_manager(&AppConfig::default());

    let backend = FallbackBackend::new(
        Arc::new(remote(&format!("http://{dead}"), None)),
        Arc::new(LocalBackend::new(Arc::clone(&local_manager))),
    );
    assert_eq!(backend.name(), "remote+local");

    let contents = backend.list_contents(None).await.unwrap();
    assert_eq!(contents.folders.len(), 2);

    let folder = backend.create_folder("Offline", None).await.unwrap();
    assert!(local_manager.get_folder(&folder.id).await.is_ok());
}

#[tokio::test]
async fn test_fallback_does_not_replay_uploads() {
    let dead = helpers::dead_address().await;
    let local_manager = helpers::seeded_manager(&AppConfig::default());

    let backend = FallbackBackend::new(
        Arc::new(remote(&format!("http://{dead}"), None)),
        Arc::new(LocalBackend::new(Arc::clone(&local_manager))),
    );

    let err = backend
        .upload_file(UploadRequest {
            name: "foto.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            folder_id: None,
            data: Bytes::from_static(b"not really a jpeg"),
            dimensions: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::BackendUnavailable);
    assert_eq!(local_manager.usage_stats().await.unwrap().file_count, 6);
}

#[tokio::test]
async fn test_backend_selected_from_config() {
    let server = helpers::spawn_server(None).await;
    let config = BackendConfig {
        mode: BackendMode::Remote,
        base_url: server.base_url.clone(),
        api_token: None,
        timeout_seconds: 5,
        fallback_to_local: false,
    };

    let backend = build_backend(&config, helpers::seeded_manager(&AppConfig::default())).unwrap();
    assert_eq!(backend.name(), "remote");

    let stats = backend.usage_stats().await.unwrap();
    assert_eq!(stats.folder_count, 3);
}
