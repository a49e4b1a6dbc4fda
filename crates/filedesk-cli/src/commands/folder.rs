//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FolderId;
use filedesk_entity::{Folder, root};

use super::file::FileRow;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List the subfolders and files of a folder
    List {
        /// Folder ID (omit for root)
        #[arg(short, long)]
        folder_id: Option<String>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Move a folder under another parent
    Move {
        /// Folder ID
        id: String,
        /// New parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Delete an empty folder
    Delete {
        /// Folder ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Parent folder
    parent: String,
    /// Created at
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            parent: f
                .parent_id
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            created_at: super::format_time(&f.created_at),
        }
    }
}

impl FolderCommand {
    /// Check arguments that need no backend.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::Create { name, .. } | Self::Rename { name, .. } => super::validate_name(name),
            _ => Ok(()),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    args.command.validate()?;
    let config = super::load_config(config_path)?;
    let backend = super::open_backend(&config)?;

    match &args.command {
        FolderCommand::List { folder_id } => {
            let folder_id = root::parse(folder_id.as_deref());
            let contents = backend.list_contents(folder_id.as_ref()).await?;

            match format {
                OutputFormat::Json => output::print_item_json(&contents),
                OutputFormat::Table => {
                    let location = contents
                        .folder
                        .as_ref()
                        .map(|f| f.name.clone())
                        .unwrap_or_else(|| "/".to_string());
                    println!("Folder: {location}");

                    let folders: Vec<FolderRow> = contents.folders.iter().map(FolderRow::from).collect();
                    output::print_list(&folders, format);

                    let files: Vec<FileRow> = contents.files.iter().map(FileRow::from).collect();
                    output::print_list(&files, format);
                }
            }
        }
        FolderCommand::Create { name, parent_id } => {
            let parent_id = root::parse(parent_id.as_deref());
            let folder = backend.create_folder(name, parent_id.as_ref()).await?;
            output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = backend.rename_folder(&FolderId::from(id.as_str()), name).await?;
            output::print_success(&format!("Folder {} renamed to '{}'", folder.id, folder.name));
        }
        FolderCommand::Move { id, parent_id } => {
            let parent_id = root::parse(parent_id.as_deref());
            let folder = backend
                .move_folder(&FolderId::from(id.as_str()), parent_id.as_ref())
                .await?;
            let target = parent_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| root::ROOT.to_string());
            output::print_success(&format!("Folder '{}' moved to {}", folder.name, target));
        }
        FolderCommand::Delete { id, yes } => {
            let folder_id = FolderId::from(id.as_str());
            let folder = backend.get_folder(&folder_id).await?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete folder '{}'?", folder.name))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            backend.delete_folder(&folder_id).await?;
            output::print_success(&format!("Folder '{}' deleted", folder.name));
        }
    }

    Ok(())
}
