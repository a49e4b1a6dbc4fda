//! Progress reporting for batch uploads.

use serde::Serialize;

use filedesk_core::error::AppError;
use filedesk_entity::File;

/// Stage a file is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    /// Being resized and re-encoded (or passed through).
    Optimizing,
    /// Being handed to the backend.
    Uploading,
    /// Recorded successfully.
    Done,
    /// Failed; the batch moves on.
    Failed,
}

/// One progress event.
#[derive(Debug, Clone, Serialize)]
pub struct UploadProgress {
    /// Position of the file in the batch, starting at 0.
    pub index: usize,
    /// Batch size.
    pub total: usize,
    /// Name of the file.
    pub file_name: String,
    /// Stage just entered.
    pub phase: UploadPhase,
    /// Files recorded so far.
    pub succeeded: usize,
    /// Files failed so far.
    pub failed: usize,
}

/// Outcome for a single file.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Name of the file as submitted.
    pub file_name: String,
    /// Recorded file on success.
    pub file: Option<File>,
    /// Failure cause otherwise.
    pub error: Option<AppError>,
    /// Bytes submitted.
    pub original_bytes: u64,
    /// Bytes handed to the backend.
    pub uploaded_bytes: u64,
    /// Whether the optimizer produced the uploaded bytes.
    pub optimized: bool,
}

impl UploadOutcome {
    /// Whether the file was recorded.
    pub fn is_success(&self) -> bool {
        self.file.is_some()
    }
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    /// Files recorded.
    pub succeeded: usize,
    /// Files that failed.
    pub failed: usize,
    /// Per-file outcomes, in submission order.
    pub results: Vec<UploadOutcome>,
}

/// Receives progress while a batch runs. Both hooks default to no-ops.
pub trait UploadObserver: Send + Sync {
    /// Called on every phase transition of every file.
    fn on_progress(&self, _progress: &UploadProgress) {}

    /// Called once when the batch finishes.
    fn on_complete(&self, _summary: &UploadSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl UploadObserver for NoopObserver {}
