//! Integration tests for file operations.

mod helpers;

use std::io::Cursor;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use helpers::TestApp;

#[tokio::test]
async fn test_create_file_derives_path_from_folder() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/file-manager/files",
            Some(json!({
                "name": "balanco-2024.pdf",
                "mime_type": "application/pdf",
                "size_bytes": 4096,
                "folder_id": "documents"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["path"], "/documents/balanco-2024.pdf");
    assert_eq!(response.data()["revision"], 1);
}

#[tokio::test]
async fn test_rename_keeps_extension_and_rewrites_path() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/files/seed-fee-table",
            Some(json!({ "name": "honorarios-2024" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "honorarios-2024.pdf");
    assert_eq!(response.data()["path"], "/documents/honorarios-2024.pdf");
}

#[tokio::test]
async fn test_move_file_rederives_path() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/files/seed-office-front/move",
            Some(json!({ "folder_id": "documents" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folder_id"], "documents");
    assert_eq!(response.data()["path"], "/documents/escritorio-fachada.jpg");
}

#[tokio::test]
async fn test_move_file_to_missing_folder_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/files/seed-team/move",
            Some(json!({ "folder_id": "ghost" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["details"]["subject"], "ghost");
}

#[tokio::test]
async fn test_delete_file_is_idempotent() {
    let app = TestApp::new();

    let first = app
        .request("DELETE", "/file-manager/files/seed-logo", None, None)
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("DELETE", "/file-manager/files/seed-logo", None, None)
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.data().is_null());
}

#[tokio::test]
async fn test_bulk_delete_reports_missing_ids() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/file-manager/files/bulk-delete",
            Some(json!({ "ids": ["seed-logo", "ghost"] })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted"], json!(["seed-logo"]));
    assert_eq!(response.data()["missing"], json!(["ghost"]));
}

#[tokio::test]
async fn test_public_url() {
    let app = TestApp::new();

    let known = app
        .request("GET", "/file-manager/files/seed-fee-table/url", None, None)
        .await;
    assert_eq!(known.data()["url"], "/documents/tabela-de-honorarios.pdf");

    let unknown = app
        .request("GET", "/file-manager/files/ghost/url", None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::OK);
    assert!(unknown.data()["url"].is_null());
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = TestApp::new();

    let hits = app
        .request("GET", "/file-manager/search?q=IMPOSTO", None, None)
        .await;
    let names: Vec<&str> = hits
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["imposto-de-renda.jpg"]);

    let empty = app.request("GET", "/file-manager/search", None, None).await;
    assert_eq!(empty.data(), &json!([]));
}

#[tokio::test]
async fn test_stats_reflect_seed() {
    let app = TestApp::new();

    let response = app.request("GET", "/file-manager/stats", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folder_count"], 3);
    assert_eq!(response.data()["file_count"], 6);
    assert_eq!(response.data()["image_count"], 4);
    assert_eq!(response.data()["document_count"], 2);
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 90, 160]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn multipart_body(boundary: &str, folder_id: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn test_multipart_upload_records_size_and_dimensions() {
    let app = TestApp::new();
    let data = png(64, 32);
    let boundary = "filedesk-test-boundary";

    let request = Request::post("/file-manager/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_body(boundary, "images", "mapa.png", &data)))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let file = &body["data"];

    assert_eq!(file["name"], "mapa.png");
    assert_eq!(file["mime_type"], "image/png");
    assert_eq!(file["size_bytes"], data.len() as u64);
    assert_eq!(file["path"], "/images/mapa.png");
    assert_eq!(file["dimensions"], json!({ "width": 64, "height": 32 }));
}
