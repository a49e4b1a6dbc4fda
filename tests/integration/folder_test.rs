//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_and_list_nested_folders() {
    let app = TestApp::new();

    let created = app
        .request("POST", "/file-manager/folders", Some(json!({ "name": "Eventos" })), None)
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.data()["parent_id"], "root");
    let parent_id = created.data()["id"].as_str().unwrap().to_string();

    let child = app
        .request(
            "POST",
            "/file-manager/folders",
            Some(json!({ "name": "2024", "parent_id": parent_id })),
            None,
        )
        .await;
    assert_eq!(child.status, StatusCode::OK);

    let listed = app
        .request(
            "GET",
            &format!("/file-manager/folders?parent_id={parent_id}"),
            None,
            None,
        )
        .await;
    let names: Vec<&str> = listed
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["2024"]);
}

#[tokio::test]
async fn test_create_under_missing_parent_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/file-manager/folders",
            Some(json!({ "name": "Orfã", "parent_id": "ghost" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["details"]["subject"], "ghost");
}

#[tokio::test]
async fn test_contents_lists_direct_children_only() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/file-manager/contents?folder_id=images", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folder"]["id"], "images");
    assert_eq!(response.data()["folders"].as_array().unwrap().len(), 1);
    assert_eq!(response.data()["files"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/folders/documents",
            Some(json!({ "name": "Documentos Fiscais" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Documentos Fiscais");
    assert_eq!(response.data()["revision"], 2);
}

#[tokio::test]
async fn test_move_folder_into_descendant_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/folders/images/move",
            Some(json!({ "parent_id": "blog" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_move_folder_to_root() {
    let app = TestApp::new();

    let response = app
        .request(
            "PUT",
            "/file-manager/folders/blog/move",
            Some(json!({ "parent_id": "root" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["parent_id"], "root");
}

#[tokio::test]
async fn test_delete_non_empty_folder_keeps_store_unchanged() {
    let app = TestApp::new();
    let before = app.manager.store().load().await;

    let response = app
        .request("DELETE", "/file-manager/folders/documents", None, None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "FOLDER_NOT_EMPTY");
    assert_eq!(app.manager.store().load().await, before);
}

#[tokio::test]
async fn test_delete_empty_folder() {
    let app = TestApp::new();

    let created = app
        .request("POST", "/file-manager/folders", Some(json!({ "name": "Temp" })), None)
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/file-manager/folders/{id}"), None, None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.data().is_null());

    let fetched = app
        .request("GET", &format!("/file-manager/folders/{id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_token_required() {
    let app = TestApp::with_token(Some("s3cret"));

    let denied = app.request("GET", "/file-manager/folders", None, None).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let wrong = app
        .request("GET", "/file-manager/folders", None, Some("nope"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let allowed = app
        .request("GET", "/file-manager/folders", None, Some("s3cret"))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    let health = app.request("GET", "/file-manager/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
}
