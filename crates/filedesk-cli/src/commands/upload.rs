//! Upload local files through the upload pipeline.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_entity::root;
use filedesk_service::upload::{UploadOutcome, UploadPhase, UploadProgress};
use filedesk_service::{UploadInput, UploadObserver, UploadPipeline, UploadSummary};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Paths of the files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Target folder ID (omit for root)
    #[arg(short, long)]
    pub folder_id: Option<String>,

    /// Upload images as-is, without resizing or recompressing
    #[arg(long)]
    pub no_optimize: bool,
}

/// Upload result row
#[derive(Debug, Serialize, Tabled)]
struct UploadRow {
    /// File name
    name: String,
    /// "ok" or "failed"
    status: String,
    /// Size on disk
    original: String,
    /// Size sent
    uploaded: String,
    /// Whether the image was optimized
    optimized: bool,
    /// Stored file id, or the error message
    detail: String,
}

impl From<&UploadOutcome> for UploadRow {
    fn from(o: &UploadOutcome) -> Self {
        let detail = match (&o.file, &o.error) {
            (Some(file), _) => file.id.to_string(),
            (None, Some(err)) => err.to_string(),
            (None, None) => String::new(),
        };
        Self {
            name: o.file_name.clone(),
            status: if o.is_success() { "ok" } else { "failed" }.to_string(),
            original: output::human_bytes(o.original_bytes),
            uploaded: output::human_bytes(o.uploaded_bytes),
            optimized: o.optimized,
            detail,
        }
    }
}

/// Prints one line per phase transition.
struct ConsoleProgress {
    quiet: bool,
}

impl UploadObserver for ConsoleProgress {
    fn on_progress(&self, progress: &UploadProgress) {
        if self.quiet {
            return;
        }
        let phase = match progress.phase {
            UploadPhase::Optimizing => "optimizing",
            UploadPhase::Uploading => "uploading",
            UploadPhase::Done => "done",
            UploadPhase::Failed => "failed",
        };
        println!(
            "[{}/{}] {:<40} {}",
            progress.index + 1,
            progress.total,
            progress.file_name,
            phase
        );
    }

    fn on_complete(&self, summary: &UploadSummary) {
        if self.quiet {
            return;
        }
        if summary.failed == 0 {
            output::print_success(&format!("{} file(s) uploaded", summary.succeeded));
        } else {
            output::print_warning(&format!(
                "{} file(s) uploaded, {} failed",
                summary.succeeded, summary.failed
            ));
        }
    }
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    if args.no_optimize {
        config.upload.optimize_images = false;
    }

    let inputs = read_inputs(&args.paths).await?;
    let backend = super::open_backend(&config)?;
    let pipeline = UploadPipeline::from_config(backend, &config.upload);

    let folder_id = root::parse(args.folder_id.as_deref());
    let observer = ConsoleProgress {
        quiet: format == OutputFormat::Json,
    };
    let summary = pipeline.run(folder_id.as_ref(), inputs, &observer).await;

    let rows: Vec<UploadRow> = summary.results.iter().map(UploadRow::from).collect();
    output::print_list(&rows, format);

    if summary.failed > 0 && summary.succeeded == 0 {
        return Err(AppError::internal(format!(
            "All {} upload(s) failed",
            summary.failed
        )));
    }
    Ok(())
}

/// Read every path into an upload input, guessing the MIME type from the
/// extension.
async fn read_inputs(paths: &[PathBuf]) -> Result<Vec<UploadInput>, AppError> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::not_found(format!("Failed to read {}: {e}", path.display()))
        })?;
        inputs.push(UploadInput::new(display_name(path), guess_mime(path), data));
    }
    Ok(inputs)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
