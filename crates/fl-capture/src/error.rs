//! Error types for capture and reporting.

use fl_config::ValidationError;
use fl_payload::PayloadError;
use thiserror::Error;

/// Errors that can occur while building or sending a report.
///
/// IP redaction and string truncation are infallible and never produce one
/// of these.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The transport refused or failed to deliver the report
    #[error("send failed: {0}")]
    Send(String),

    /// The report could not be encoded or fitted to its budget
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Settings were rejected
    #[error("config error: {0}")]
    Config(#[from] ValidationError),
}

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;
