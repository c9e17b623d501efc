//! Error types for information flow preprocessing

use thiserror::Error;

/// Errors raised while validating inputs or loading them from disk.
///
/// Division by zero inside the kept/updated computation is not an error:
/// it is resolved to a zero contribution and never surfaces here.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Inconsistent lengths between inputs, or a cluster index out of range
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Empty sentence or empty cluster
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure converting an activation tensor into hidden-state rows
    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),
}

/// Result type alias for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;
