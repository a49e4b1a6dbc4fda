//! Sequential batch upload.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use filedesk_core::config::UploadConfig;
use filedesk_core::types::FolderId;
use filedesk_entity::Dimensions;
use filedesk_entity::file::model::is_image_mime;

use super::optimizer::{ImageOptimizer, probe_dimensions};
use super::progress::{UploadObserver, UploadOutcome, UploadPhase, UploadProgress, UploadSummary};
use crate::backend::{FileBackend, UploadRequest};

/// A file submitted for upload.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// File name.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw content.
    pub data: Bytes,
}

impl UploadInput {
    /// Creates an input.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// Content after the optimization step.
struct Prepared {
    data: Bytes,
    dimensions: Option<Dimensions>,
    optimized: bool,
}

/// Uploads files one at a time, optimizing images first.
///
/// A failing file is counted and the batch continues with the next one.
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    backend: Arc<dyn FileBackend>,
    optimizer: ImageOptimizer,
}

impl UploadPipeline {
    /// Creates a pipeline over `backend`.
    pub fn new(backend: Arc<dyn FileBackend>, optimizer: ImageOptimizer) -> Self {
        Self { backend, optimizer }
    }

    /// Creates a pipeline using the upload configuration section.
    pub fn from_config(backend: Arc<dyn FileBackend>, config: &UploadConfig) -> Self {
        Self::new(backend, ImageOptimizer::from_config(config))
    }

    /// Upload `inputs` into `folder` in order.
    pub async fn run(
        &self,
        folder: Option<&FolderId>,
        inputs: Vec<UploadInput>,
        observer: &dyn UploadObserver,
    ) -> UploadSummary {
        let total = inputs.len();
        let mut summary = UploadSummary::default();

        for (index, input) in inputs.into_iter().enumerate() {
            let report = |phase: UploadPhase, summary: &UploadSummary| {
                observer.on_progress(&UploadProgress {
                    index,
                    total,
                    file_name: input.name.clone(),
                    phase,
                    succeeded: summary.succeeded,
                    failed: summary.failed,
                });
            };

            report(UploadPhase::Optimizing, &summary);
            let prepared = self.prepare(&input).await;

            report(UploadPhase::Uploading, &summary);
            let request = UploadRequest {
                name: input.name.clone(),
                mime_type: input.mime_type.clone(),
                folder_id: folder.cloned(),
                data: prepared.data.clone(),
                dimensions: prepared.dimensions,
            };
            let result = self.backend.upload_file(request).await;

            let mut outcome = UploadOutcome {
                file_name: input.name.clone(),
                file: None,
                error: None,
                original_bytes: input.data.len() as u64,
                uploaded_bytes: prepared.data.len() as u64,
                optimized: prepared.optimized,
            };
            let phase = match result {
                Ok(file) => {
                    summary.succeeded += 1;
                    outcome.file = Some(file);
                    UploadPhase::Done
                }
                Err(err) => {
                    warn!(file = %input.name, error = %err, "Upload failed");
                    summary.failed += 1;
                    outcome.error = Some(err);
                    UploadPhase::Failed
                }
            };
            summary.results.push(outcome);
            report(phase, &summary);
        }

        info!(
            backend = self.backend.name(),
            total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Upload batch finished"
        );
        observer.on_complete(&summary);
        summary
    }

    /// Optimize images; anything else, or an image that fails to
    /// optimize, passes through unchanged.
    async fn prepare(&self, input: &UploadInput) -> Prepared {
        if !is_image_mime(&input.mime_type) {
            return Prepared {
                data: input.data.clone(),
                dimensions: None,
                optimized: false,
            };
        }

        if self.optimizer.applies_to(&input.mime_type) {
            match self.optimizer.optimize(input.data.clone(), &input.mime_type).await {
                Ok(out) => {
                    return Prepared {
                        data: out.data,
                        dimensions: Some(out.dimensions),
                        optimized: true,
                    };
                }
                Err(err) => warn!(
                    file = %input.name,
                    error = %err,
                    "Image optimization failed, uploading original"
                ),
            }
        }

        Prepared {
            data: input.data.clone(),
            dimensions: probe_dimensions(&input.data),
            optimized: false,
        }
    }
}
