//! File management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FileId;
use filedesk_entity::{File, root};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List the files directly inside a folder
    List {
        /// Folder ID (omit for root)
        #[arg(short, long)]
        folder_id: Option<String>,
    },
    /// Rename a file; the extension is kept when the new name has none
    Rename {
        /// File ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Move a file into another folder
    Move {
        /// File ID
        id: String,
        /// Target folder ID (omit for root)
        #[arg(short, long)]
        folder_id: Option<String>,
    },
    /// Delete one or more files
    Delete {
        /// File IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the public URL of a file
    Url {
        /// File ID
        id: String,
    },
    /// Search files by name (case-insensitive)
    Search {
        /// Search term
        term: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// MIME type
    #[tabled(rename = "type")]
    mime_type: String,
    /// Human readable size
    size: String,
    /// Public path
    path: String,
    /// Pixel dimensions for images
    dimensions: String,
    /// Uploaded at
    uploaded_at: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            mime_type: f.mime_type.clone(),
            size: output::human_bytes(f.size_bytes),
            path: f.path.clone(),
            dimensions: f
                .dimensions
                .map(|d| format!("{}x{}", d.width, d.height))
                .unwrap_or_else(|| "-".to_string()),
            uploaded_at: super::format_time(&f.uploaded_at),
        }
    }
}

impl FileCommand {
    /// Check arguments that need no backend.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::Rename { name, .. } => super::validate_name(name),
            _ => Ok(()),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    args.command.validate()?;
    let config = super::load_config(config_path)?;
    let backend = super::open_backend(&config)?;

    match &args.command {
        FileCommand::List { folder_id } => {
            let folder_id = root::parse(folder_id.as_deref());
            let files = backend.list_files_in_folder(folder_id.as_ref()).await?;
            let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
        FileCommand::Rename { id, name } => {
            let file = backend.rename_file(&FileId::from(id.as_str()), name).await?;
            output::print_success(&format!("File renamed to '{}' ({})", file.name, file.path));
        }
        FileCommand::Move { id, folder_id } => {
            let folder_id = root::parse(folder_id.as_deref());
            let file = backend
                .move_file(&FileId::from(id.as_str()), folder_id.as_ref())
                .await?;
            output::print_success(&format!("File '{}' moved to {}", file.name, file.path));
        }
        FileCommand::Delete { ids } => {
            if let [id] = ids.as_slice() {
                backend.delete_file(&FileId::from(id.as_str())).await?;
                output::print_success(&format!("File {id} deleted"));
            } else {
                let ids: Vec<FileId> = ids.iter().map(|id| FileId::from(id.as_str())).collect();
                let result = backend.delete_files(&ids).await?;
                output::print_success(&format!("{} file(s) deleted", result.deleted.len()));
                if !result.missing.is_empty() {
                    let missing: Vec<String> = result.missing.iter().map(|id| id.to_string()).collect();
                    output::print_warning(&format!("Not found: {}", missing.join(", ")));
                }
            }
        }
        FileCommand::Url { id } => match backend.get_public_url(&FileId::from(id.as_str())).await? {
            Some(url) => println!("{url}"),
            None => {
                return Err(AppError::not_found("File not found").with_subject(id));
            }
        },
        FileCommand::Search { term } => {
            let files = backend.search_by_name(Some(term)).await?;
            let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
