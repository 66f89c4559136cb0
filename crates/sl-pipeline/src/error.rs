//! Error types for sl-pipeline

use thiserror::Error;

/// Pipeline orchestration errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Storage error
    #[error(transparent)]
    Store(#[from] sl_store::StoreError),

    /// P001: An input file exists but is not a JSON document batch
    #[error("[P001] Invalid input file {path}: {message}")]
    InputParse { path: String, message: String },

    /// P002: IO error with file path context
    #[error("[P002] IO error on '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for PipelineError
pub type PipelineResult<T> = Result<T, PipelineError>;
