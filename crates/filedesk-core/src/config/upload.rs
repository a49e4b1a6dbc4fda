//! Upload pipeline configuration.

use serde::{Deserialize, Serialize};

/// Image optimization settings applied before upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Whether images are resized and recompressed before upload.
    #[serde(default = "default_true")]
    pub optimize_images: bool,
    /// Maximum output width in pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Maximum output height in pixels.
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Encoder quality (1-100) for the first encode.
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Byte budget; a larger first encode triggers one more pass.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Encoder quality used for the second pass.
    #[serde(default = "default_fallback_quality")]
    pub fallback_quality: u8,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            optimize_images: true,
            max_width: default_max_width(),
            max_height: default_max_height(),
            quality: default_quality(),
            max_bytes: default_max_bytes(),
            fallback_quality: default_fallback_quality(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_width() -> u32 {
    1920
}

fn default_max_height() -> u32 {
    1080
}

fn default_quality() -> u8 {
    85
}

fn default_max_bytes() -> u64 {
    1_048_576 // 1 MB
}

fn default_fallback_quality() -> u8 {
    60
}
