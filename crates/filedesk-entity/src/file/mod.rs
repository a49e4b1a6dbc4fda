//! File domain entities.

pub mod model;

pub use model::{BulkDeleteResult, CreateFile, Dimensions, File};
