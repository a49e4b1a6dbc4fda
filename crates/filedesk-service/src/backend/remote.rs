//! HTTP client backend for the `/file-manager` API of another instance.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use filedesk_core::config::BackendConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::{BulkDeleteResult, CreateFile, File, Folder, FolderContents, UsageStats};

use super::{FileBackend, UploadRequest};

/// Path segment every endpoint lives under.
pub const API_PREFIX: &str = "file-manager";

/// Backend calling the HTTP API with an optional bearer token.
///
/// Connection failures, timeouts, and 5xx answers become
/// `BackendUnavailable`. Other error answers are rebuilt from the error
/// code in the response body.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    base: Url,
    token: Option<String>,
}

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body: `{"error": "NOT_FOUND", "message": "...", "details": {...}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorKind,
    message: String,
    #[serde(default)]
    details: Option<ErrorDetails>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    #[serde(default)]
    subject: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
    parent_id: Option<&'a FolderId>,
}

#[derive(Debug, Serialize)]
struct RenameBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct MoveFolderBody<'a> {
    parent_id: Option<&'a FolderId>,
}

#[derive(Debug, Serialize)]
struct MoveFileBody<'a> {
    folder_id: Option<&'a FolderId>,
}

#[derive(Debug, Serialize)]
struct BulkDeleteBody<'a> {
    ids: &'a [FileId],
}

#[derive(Debug, Deserialize)]
struct UrlBody {
    url: Option<String>,
}

impl RemoteBackend {
    /// Creates a client for `base_url` (scheme, host, optional path prefix).
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> AppResult<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid backend base URL '{base_url}'"),
                e,
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Backend base URL '{base_url}' cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Creates a client from the backend configuration section.
    pub fn from_config(config: &BackendConfig) -> AppResult<Self> {
        Self::new(
            &config.base_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// URL of `/file-manager/<segments...>`, with each segment escaped.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(API_PREFIX).extend(segments);
        }
        url
    }

    fn folder_query(&self, segments: &[&str], key: &str, folder: Option<&FolderId>) -> Url {
        let mut url = self.endpoint(segments);
        if let Some(id) = folder {
            url.query_pairs_mut().append_pair(key, id.as_str());
        }
        url
    }

    /// Starts a request with the bearer token attached.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::BackendUnavailable,
                format!("Remote {operation} failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Remote backend answered");

        if !status.is_success() {
            return Err(error_from_response(operation, response).await);
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response body for {operation}: {e}"),
                e,
            )
        })?;
        Ok(envelope.data)
    }
}

async fn error_from_response(operation: &str, response: Response) -> AppError {
    let status = response.status();
    let body = response.json::<ErrorBody>().await.ok();

    if status.is_server_error() {
        let detail = body.map(|b| b.message).unwrap_or_else(|| status.to_string());
        return AppError::backend_unavailable(format!("Remote {operation} failed: {detail}"));
    }

    match body {
        Some(body) => {
            let mut err = AppError::new(body.error, body.message);
            err.subject = body.details.and_then(|d| d.subject);
            err
        }
        None => AppError::new(
            kind_for_status(status),
            format!("Remote {operation} failed with status {status}"),
        ),
    }
}

fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Unauthorized,
        StatusCode::PAYLOAD_TOO_LARGE => ErrorKind::PayloadTooLarge,
        s if s.is_client_error() => ErrorKind::Validation,
        _ => ErrorKind::Internal,
    }
}

#[async_trait]
impl FileBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&FolderId>) -> AppResult<Folder> {
        let body = CreateFolderBody { name, parent_id };
        let request = self
            .request(Method::POST, self.endpoint(&["folders"]))
            .json(&body);
        self.send("create_folder", request).await
    }

    async fn get_folder(&self, id: &FolderId) -> AppResult<Folder> {
        let url = self.endpoint(&["folders", id.as_str()]);
        self.send("get_folder", self.request(Method::GET, url)).await
    }

    async fn rename_folder(&self, id: &FolderId, new_name: &str) -> AppResult<Folder> {
        let url = self.endpoint(&["folders", id.as_str()]);
        let request = self
            .request(Method::PUT, url)
            .json(&RenameBody { name: new_name });
        self.send("rename_folder", request).await
    }

    async fn move_folder(&self, id: &FolderId, new_parent: Option<&FolderId>) -> AppResult<Folder> {
        let url = self.endpoint(&["folders", id.as_str(), "move"]);
        let request = self.request(Method::PUT, url).json(&MoveFolderBody {
            parent_id: new_parent,
        });
        self.send("move_folder", request).await
    }

    async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        let url = self.endpoint(&["folders", id.as_str()]);
        self.send("delete_folder", self.request(Method::DELETE, url)).await
    }

    async fn list_subfolders(&self, parent: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        let url = self.folder_query(&["folders"], "parent_id", parent);
        self.send("list_subfolders", self.request(Method::GET, url)).await
    }

    async fn list_contents(&self, folder: Option<&FolderId>) -> AppResult<FolderContents> {
        let url = self.folder_query(&["contents"], "folder_id", folder);
        self.send("list_contents", self.request(Method::GET, url)).await
    }

    async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        let request = self
            .request(Method::POST, self.endpoint(&["files"]))
            .json(&req);
        self.send("create_file", request).await
    }

    async fn upload_file(&self, req: UploadRequest) -> AppResult<File> {
        let part = reqwest::multipart::Part::bytes(req.data.to_vec())
            .file_name(req.name.clone())
            .mime_str(&req.mime_type)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid MIME type '{}'", req.mime_type),
                    e,
                )
            })?;

        let mut form = reqwest::multipart::Form::new();
        if let Some(folder) = &req.folder_id {
            form = form.text("folder_id", folder.to_string());
        }
        if let Some(dims) = req.dimensions {
            form = form
                .text("width", dims.width.to_string())
                .text("height", dims.height.to_string());
        }
        form = form.part("file", part);

        let request = self
            .request(Method::POST, self.endpoint(&["upload"]))
            .multipart(form);
        self.send("upload_file", request).await
    }

    async fn get_file(&self, id: &FileId) -> AppResult<File> {
        let url = self.endpoint(&["files", id.as_str()]);
        self.send("get_file", self.request(Method::GET, url)).await
    }

    async fn rename_file(&self, id: &FileId, new_name: &str) -> AppResult<File> {
        let url = self.endpoint(&["files", id.as_str()]);
        let request = self
            .request(Method::PUT, url)
            .json(&RenameBody { name: new_name });
        self.send("rename_file", request).await
    }

    async fn move_file(&self, id: &FileId, folder: Option<&FolderId>) -> AppResult<File> {
        let url = self.endpoint(&["files", id.as_str(), "move"]);
        let request = self
            .request(Method::PUT, url)
            .json(&MoveFileBody { folder_id: folder });
        self.send("move_file", request).await
    }

    async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        let url = self.endpoint(&["files", id.as_str()]);
        self.send("delete_file", self.request(Method::DELETE, url)).await
    }

    async fn delete_files(&self, ids: &[FileId]) -> AppResult<BulkDeleteResult> {
        let request = self
            .request(Method::POST, self.endpoint(&["files", "bulk-delete"]))
            .json(&BulkDeleteBody { ids });
        self.send("delete_files", request).await
    }

    async fn list_files_in_folder(&self, folder: Option<&FolderId>) -> AppResult<Vec<File>> {
        let url = self.folder_query(&["files"], "folder_id", folder);
        self.send("list_files_in_folder", self.request(Method::GET, url)).await
    }

    async fn search_by_name(&self, term: Option<&str>) -> AppResult<Vec<File>> {
        let mut url = self.endpoint(&["search"]);
        if let Some(term) = term {
            url.query_pairs_mut().append_pair("q", term);
        }
        self.send("search_by_name", self.request(Method::GET, url)).await
    }

    async fn get_public_url(&self, id: &FileId) -> AppResult<Option<String>> {
        let url = self.endpoint(&["files", id.as_str(), "url"]);
        let body: UrlBody = self.send("get_public_url", self.request(Method::GET, url)).await?;
        Ok(body.url)
    }

    async fn usage_stats(&self) -> AppResult<UsageStats> {
        let url = self.endpoint(&["stats"]);
        self.send("usage_stats", self.request(Method::GET, url)).await
    }
}
