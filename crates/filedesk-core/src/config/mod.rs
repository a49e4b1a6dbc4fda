//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `FILEDESK__*` environment variables. Every field carries a
//! serde default, so an empty configuration is valid.

pub mod app;
pub mod backend;
pub mod logging;
pub mod storage;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::backend::{BackendConfig, BackendMode};
pub use self::logging::LoggingConfig;
pub use self::storage::{LocationRule, StorageConfig};
pub use self::upload::UploadConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Entity store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Service adapter settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Upload pipeline settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, the file at `path` (both optional), and
    /// environment variables prefixed with `FILEDESK__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.storage.provider, "json");
        assert_eq!(config.backend.mode, BackendMode::Local);
        assert!(config.upload.optimize_images);
        assert_eq!(config.storage.locations.len(), 2);
    }

    #[test]
    fn test_file_overrides_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[backend]
mode = "remote"
base_url = "http://files.internal:9000"

[upload]
max_width = 800
quality = 70

[[storage.locations]]
folder_id = "press"
prefix = "/press"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.backend.mode, BackendMode::Remote);
        assert_eq!(config.backend.base_url, "http://files.internal:9000");
        assert_eq!(config.upload.max_width, 800);
        assert_eq!(config.upload.quality, 70);
        assert_eq!(config.upload.max_height, 1080);
        assert_eq!(config.storage.locations.len(), 1);
        assert_eq!(config.storage.locations[0].prefix, "/press");
    }
}
