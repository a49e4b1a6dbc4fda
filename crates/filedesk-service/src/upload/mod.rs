//! Batch upload with image optimization.

pub mod optimizer;
pub mod pipeline;
pub mod progress;

pub use optimizer::{ImageOptimizer, OptimizedImage, OptimizerSettings, probe_dimensions};
pub use pipeline::{UploadInput, UploadPipeline};
pub use progress::{
    NoopObserver, UploadObserver, UploadOutcome, UploadPhase, UploadProgress, UploadSummary,
};
