use std::path::PathBuf;

use thiserror::Error;

use magicgen_core::SchemaError;

use crate::model::GenerationReport;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("invalid range for field '{field}': min {min} is greater than max {max}")]
    InvertedRange { field: String, min: i64, max: i64 },
    #[error("field '{field}' has no options to choose from")]
    EmptyOptions { field: String },
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("worker panicked while writing '{}': {message}", path.display())]
    WorkerPanicked { path: PathBuf, message: String },
    #[error("generation failed for {} of {} files", .0.failures.len(), .0.files_requested)]
    Failed(GenerationReport),
}
