//! Error types for payload operations.

use thiserror::Error;

/// Errors that can occur while measuring or fitting a payload.
///
/// String truncation itself never fails; these only come from the
/// size-budget path, which has to serialize the report to measure it.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Every size strategy ran and the payload is still too large
    #[error("payload is {size} bytes after all strategies (limit {limit})")]
    BudgetExceeded { size: usize, limit: usize },
}

/// Result type alias for payload operations.
pub type Result<T> = std::result::Result<T, PayloadError>;
