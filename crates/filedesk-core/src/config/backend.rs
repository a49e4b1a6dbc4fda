//! Service adapter configuration.

use serde::{Deserialize, Serialize};

/// Which backend implementation serves file-manager operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// The in-process repository.
    #[default]
    Local,
    /// The HTTP API under `/file-manager`.
    Remote,
}

/// Service adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Selected backend.
    #[serde(default)]
    pub mode: BackendMode,
    /// Base URL of the remote API (without the `/file-manager` suffix).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token attached to every remote request.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Remote request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Retry against the local repository when the remote is unavailable.
    #[serde(default = "default_true")]
    pub fallback_to_local: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Local,
            base_url: default_base_url(),
            api_token: None,
            timeout_seconds: default_timeout(),
            fallback_to_local: true,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
