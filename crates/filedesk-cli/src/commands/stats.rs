//! Usage statistics command.

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;

/// Execute the stats command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let backend = super::open_backend(&config)?;
    let stats = backend.usage_stats().await?;

    match format {
        OutputFormat::Json => output::print_item_json(&stats),
        OutputFormat::Table => {
            println!("Usage ({} backend)", backend.name());
            output::print_kv("Folders", &stats.folder_count.to_string());
            output::print_kv(
                "Files",
                &format!("{} ({})", stats.file_count, output::human_bytes(stats.total_bytes)),
            );
            output::print_kv(
                "Images",
                &format!("{} ({})", stats.image_count, output::human_bytes(stats.image_bytes)),
            );
            output::print_kv(
                "Documents",
                &format!(
                    "{} ({})",
                    stats.document_count,
                    output::human_bytes(stats.document_bytes)
                ),
            );
        }
    }

    Ok(())
}
