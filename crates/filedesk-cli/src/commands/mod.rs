//! CLI command definitions and dispatch.

pub mod file;
pub mod folder;
pub mod serve;
pub mod stats;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;
use filedesk_service::{FileBackend, FileManager, build_backend};

/// FileDesk: file and folder manager for the marketing site
#[derive(Debug, Parser)]
#[command(name = "filedesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the FileDesk server
    Serve(serve::ServeArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Upload local files, optimizing images first
    Upload(upload::UploadArgs),
    /// Show usage statistics
    Stats,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Folder(args) => folder::execute(args, &self.config, self.format).await,
            Commands::File(args) => file::execute(args, &self.config, self.format).await,
            Commands::Upload(args) => upload::execute(args, &self.config, self.format).await,
            Commands::Stats => stats::execute(&self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build the backend selected by the configuration.
pub fn open_backend(config: &AppConfig) -> Result<Arc<dyn FileBackend>, AppError> {
    let manager = Arc::new(FileManager::from_config(&config.storage)?);
    build_backend(&config.backend, manager)
}

/// Longest accepted folder or file name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Helper: reject blank or over-long names before they reach the backend.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name must not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Helper: format a timestamp for table output.
pub fn format_time(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use filedesk_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "filedesk",
            "--format",
            "json",
            "folder",
            "create",
            "--name",
            "Imagens",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Folder(_)));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Imagens").is_ok());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());

        for bad in ["", "   ", "\t"] {
            let err = validate_name(bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        let err = validate_name(&"a".repeat(MAX_NAME_LEN + 1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_blank_names_are_rejected_before_the_backend() {
        let missing_config = "does/not/exist.toml";
        let blank_create = Cli::try_parse_from([
            "filedesk", "--config", missing_config, "folder", "create", "--name", " ",
        ])
        .unwrap();
        let err = blank_create.execute().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let blank_rename = Cli::try_parse_from([
            "filedesk", "--config", missing_config, "file", "rename", "seed-logo", "--name", "",
        ])
        .unwrap();
        let err = blank_rename.execute().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_upload_requires_paths() {
        assert!(Cli::try_parse_from(["filedesk", "upload"]).is_err());
        assert!(Cli::try_parse_from(["filedesk", "upload", "a.jpg", "b.pdf"]).is_ok());
    }
}
