//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use filedesk_api::{AppState, build_app};
use filedesk_core::config::AppConfig;
use filedesk_entity::LocationTable;
use filedesk_service::FileManager;
use filedesk_storage::MemoryStore;
use filedesk_storage::seed::default_snapshot;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repository behind the router, for direct assertions
    pub manager: Arc<FileManager>,
}

impl TestApp {
    /// Application over the default seed dataset without auth
    pub fn new() -> Self {
        Self::with_token(None)
    }

    /// Application over the default seed dataset, requiring `token` if set
    pub fn with_token(token: Option<&str>) -> Self {
        let mut config = AppConfig::default();
        config.server.api_token = token.map(str::to_string);

        let manager = seeded_manager(&config);
        let router = build_app(AppState::new(config, Arc::clone(&manager)));
        Self { router, manager }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body.map(|b| b.to_string()).unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Repository over an in-memory store holding the seed dataset
pub fn seeded_manager(config: &AppConfig) -> Arc<FileManager> {
    let locations = LocationTable::from_rules(&config.storage.locations);
    let store = MemoryStore::from_snapshot(default_snapshot(&locations));
    Arc::new(FileManager::new(Arc::new(store), locations))
}

/// A server listening on an ephemeral local port
pub struct TestServer {
    /// Base URL without the `/file-manager` suffix
    pub base_url: String,
    /// Repository the server writes to
    pub manager: Arc<FileManager>,
}

/// Serve the API over TCP on 127.0.0.1 with a fresh seeded store
pub async fn spawn_server(token: Option<&str>) -> TestServer {
    let app = TestApp::with_token(token);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let router = app.router;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        manager: app.manager,
    }
}

/// An address nothing listens on
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("No local address")
}
