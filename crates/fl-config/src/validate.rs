//! Settings validation errors and semantic checks.

use crate::{Settings, SettingsFile};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
        }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// RFC 9110 token characters.
static RE_HEADER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[!#$%&'*+.^_`|~0-9A-Za-z-]+$").expect("valid header regex"));

/// Check a parsed settings file and turn it into [`Settings`].
pub fn validate_settings(file: SettingsFile) -> ValidationResult<Settings> {
    let max_string_length = match file.max_string_length {
        None => crate::DEFAULT_MAX_STRING_LENGTH,
        Some(n) if n < 0 => {
            return Err(ValidationError::invalid(
                "max_string_length",
                format!("must be >= 0, got {}", n),
            ))
        }
        Some(n) => usize::try_from(n)
            .map_err(|_| ValidationError::invalid("max_string_length", "out of range"))?,
    };

    let max_payload_bytes = match file.max_payload_bytes {
        None => crate::DEFAULT_MAX_PAYLOAD_BYTES,
        Some(n) if n <= 0 => {
            return Err(ValidationError::invalid(
                "max_payload_bytes",
                format!("must be > 0, got {}", n),
            ))
        }
        Some(n) => usize::try_from(n)
            .map_err(|_| ValidationError::invalid("max_payload_bytes", "out of range"))?,
    };

    let environment = match file.environment {
        Some(env) if env.trim().is_empty() => {
            return Err(ValidationError::invalid("environment", "must not be empty"))
        }
        Some(env) => env,
        None => crate::DEFAULT_ENVIRONMENT.to_string(),
    };

    // An empty header name means "use the peer address".
    let user_ip_header = file.user_ip_header.filter(|h| !h.is_empty());
    if let Some(ref header) = user_ip_header {
        if !RE_HEADER_NAME.is_match(header) {
            return Err(ValidationError::invalid(
                "user_ip_header",
                format!("'{}' is not a valid header name", header),
            ));
        }
    }

    Ok(Settings {
        environment,
        max_string_length,
        max_payload_bytes,
        capture_ip: file.capture_ip,
        user_ip_header,
        code_version: file.code_version,
    })
}
