//! Image resize and re-encode before upload.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use filedesk_core::config::UploadConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_entity::Dimensions;
use filedesk_entity::file::model::is_image_mime;

/// Limits applied to every optimized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerSettings {
    /// Whether images are optimized at all.
    pub enabled: bool,
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// JPEG quality for the first pass (1-100).
    pub quality: u8,
    /// Output size above which a JPEG gets one more pass.
    pub max_bytes: u64,
    /// JPEG quality for that second pass.
    pub fallback_quality: u8,
}

impl From<&UploadConfig> for OptimizerSettings {
    fn from(config: &UploadConfig) -> Self {
        Self {
            enabled: config.optimize_images,
            max_width: config.max_width.max(1),
            max_height: config.max_height.max(1),
            quality: config.quality.clamp(1, 100),
            max_bytes: config.max_bytes,
            fallback_quality: config.fallback_quality.clamp(1, 100),
        }
    }
}

/// Result of a successful optimization.
#[derive(Debug, Clone)]
pub struct OptimizedImage {
    /// Encoded output.
    pub data: Bytes,
    /// Size of the decoded input.
    pub original: Dimensions,
    /// Size of the output.
    pub dimensions: Dimensions,
    /// Number of encode passes (1 or 2).
    pub passes: u8,
}

/// Downscales images to fit the configured box and re-encodes them.
#[derive(Debug, Clone)]
pub struct ImageOptimizer {
    settings: OptimizerSettings,
}

impl ImageOptimizer {
    /// Creates an optimizer with explicit settings.
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }

    /// Creates an optimizer from the upload configuration section.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(OptimizerSettings::from(config))
    }

    /// Whether content of `mime_type` goes through [`Self::optimize`].
    pub fn applies_to(&self, mime_type: &str) -> bool {
        self.settings.enabled && is_image_mime(mime_type)
    }

    /// Output size for a `width` x `height` input: scaled by
    /// `min(max_w / w, max_h / h, 1)`, rounded, never upscaled.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        fit_within(width, height, self.settings.max_width, self.settings.max_height)
    }

    /// Decode, downscale, and re-encode `data` declared as `mime_type`.
    ///
    /// Runs on the blocking pool. Any decode or encode failure is an
    /// `OptimizationFailure`; callers are expected to upload the original.
    pub async fn optimize(&self, data: Bytes, mime_type: &str) -> AppResult<OptimizedImage> {
        let format = ImageFormat::from_mime_type(mime_type).ok_or_else(|| {
            AppError::optimization(format!("Unsupported image type '{mime_type}'"))
        })?;
        let settings = self.settings;

        tokio::task::spawn_blocking(move || optimize_blocking(settings, &data, format))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Image task panicked", e))?
    }
}

fn optimize_blocking(
    settings: OptimizerSettings,
    data: &[u8],
    format: ImageFormat,
) -> AppResult<OptimizedImage> {
    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| AppError::with_source(ErrorKind::OptimizationFailure, "Failed to decode image", e))?;

    let original = Dimensions {
        width: img.width(),
        height: img.height(),
    };
    let (width, height) = fit_within(
        original.width,
        original.height,
        settings.max_width,
        settings.max_height,
    );
    let img = if (width, height) == (original.width, original.height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let mut encoded = encode(&img, format, settings.quality)?;
    let mut passes = 1;
    if format == ImageFormat::Jpeg && encoded.len() as u64 > settings.max_bytes {
        encoded = encode(&img, format, settings.fallback_quality)?;
        passes = 2;
    }

    tracing::debug!(
        from = %format!("{}x{}", original.width, original.height),
        to = %format!("{width}x{height}"),
        input_bytes = data.len(),
        output_bytes = encoded.len(),
        passes,
        "Optimized image"
    );

    Ok(OptimizedImage {
        data: Bytes::from(encoded),
        original,
        dimensions: Dimensions { width, height },
        passes,
    })
}

fn encode(img: &DynamicImage, format: ImageFormat, quality: u8) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        }
        other => img.write_to(&mut Cursor::new(&mut buf), other),
    };
    result.map_err(|e| AppError::with_source(ErrorKind::OptimizationFailure, "Failed to encode image", e))?;
    Ok(buf)
}

/// Largest size with the input's aspect ratio that fits the box.
fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (mw, mh) = (u64::from(max_width), u64::from(max_height));

    // Compare max_w / w against max_h / h without floats.
    if mw * h <= mh * w {
        let scaled = (h * mw + w / 2) / w;
        (max_width, scaled.max(1) as u32)
    } else {
        let scaled = (w * mh + h / 2) / h;
        (scaled.max(1) as u32, max_height)
    }
}

/// Read image dimensions from the header without decoding pixels.
pub fn probe_dimensions(data: &[u8]) -> Option<Dimensions> {
    let (width, height) = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;

    fn settings(max_width: u32, max_height: u32) -> OptimizerSettings {
        OptimizerSettings {
            enabled: true,
            max_width,
            max_height,
            quality: 85,
            max_bytes: 1_048_576,
            fallback_quality: 60,
        }
    }

    fn jpeg(width: u32, height: u32) -> Bytes {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 90))
            .unwrap();
        Bytes::from(buf)
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(2000, 1500, 1920, 1920), (1920, 1440));
        assert_eq!(fit_within(2000, 1500, 1920, 1080), (1440, 1080));
        assert_eq!(fit_within(800, 600, 1920, 1080), (800, 600));
        assert_eq!(fit_within(1080, 4000, 1920, 1080), (292, 1080));
        assert_eq!(fit_within(10_000, 1, 100, 100), (100, 1));
    }

    #[tokio::test]
    async fn test_large_jpeg_is_downscaled() {
        let optimizer = ImageOptimizer::new(settings(1920, 1920));
        let out = optimizer.optimize(jpeg(2000, 1500), "image/jpeg").await.unwrap();

        assert_eq!(out.original, Dimensions { width: 2000, height: 1500 });
        assert_eq!(out.dimensions, Dimensions { width: 1920, height: 1440 });
        assert_eq!(probe_dimensions(&out.data), Some(out.dimensions));
    }

    #[tokio::test]
    async fn test_small_image_is_not_upscaled() {
        let optimizer = ImageOptimizer::new(settings(1920, 1080));
        let out = optimizer.optimize(jpeg(320, 240), "image/jpeg").await.unwrap();
        assert_eq!(out.dimensions, Dimensions { width: 320, height: 240 });
        assert_eq!(out.passes, 1);
    }

    #[tokio::test]
    async fn test_oversized_output_gets_second_pass() {
        let optimizer = ImageOptimizer::new(OptimizerSettings {
            max_bytes: 1,
            ..settings(200, 200)
        });
        let out = optimizer.optimize(jpeg(400, 300), "image/jpeg").await.unwrap();
        assert_eq!(out.passes, 2);
        assert_eq!(out.dimensions, Dimensions { width: 200, height: 150 });
    }

    #[tokio::test]
    async fn test_png_keeps_format() {
        let img = ImageBuffer::from_pixel(300, 100, Rgb([200u8, 10, 10]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();

        let optimizer = ImageOptimizer::new(settings(150, 150));
        let out = optimizer.optimize(Bytes::from(buf), "image/png").await.unwrap();
        assert_eq!(out.dimensions, Dimensions { width: 150, height: 50 });
        assert_eq!(image::guess_format(&out.data).unwrap(), ImageFormat::Png);
    }

    #[tokio::test]
    async fn test_undecodable_image_is_optimization_failure() {
        let optimizer = ImageOptimizer::new(settings(1920, 1080));
        let err = optimizer
            .optimize(Bytes::from_static(b"definitely not a jpeg"), "image/jpeg")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OptimizationFailure);

        let err = optimizer
            .optimize(Bytes::from_static(b"<svg/>"), "image/svg+xml")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OptimizationFailure);
    }

    #[test]
    fn test_applies_only_to_images_when_enabled() {
        let optimizer = ImageOptimizer::new(settings(1920, 1080));
        assert!(optimizer.applies_to("image/png"));
        assert!(!optimizer.applies_to("application/pdf"));

        let disabled = ImageOptimizer::new(OptimizerSettings {
            enabled: false,
            ..settings(1920, 1080)
        });
        assert!(!disabled.applies_to("image/png"));
    }

    #[test]
    fn test_probe_dimensions_of_garbage_is_none() {
        assert_eq!(probe_dimensions(b"%PDF-1.7"), None);
    }
}
