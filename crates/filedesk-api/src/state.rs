//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filedesk_core::config::AppConfig;
use filedesk_core::result::AppResult;
use filedesk_service::FileManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// File/folder repository
    pub manager: Arc<FileManager>,
}

impl AppState {
    /// Builds the state, opening the store named by the configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let manager = FileManager::from_config(&config.storage)?;
        Ok(Self::new(config, Arc::new(manager)))
    }

    /// Builds the state around an existing repository.
    pub fn new(config: AppConfig, manager: Arc<FileManager>) -> Self {
        Self {
            config: Arc::new(config),
            manager,
        }
    }
}
