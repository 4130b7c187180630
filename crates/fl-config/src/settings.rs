//! Settings types.

use crate::validate::{validate_settings, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings as they appear in a file, before validation.
///
/// Integers are signed so that a negative limit is reported as a
/// configuration error instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_string_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload_bytes: Option<i64>,

    /// One of `full`, `anonymize`, `none`. Anything else means `full`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ip_header: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_version: Option<String>,
}

impl SettingsFile {
    /// Parse from JSON text.
    pub fn from_json(content: &str) -> ValidationResult<Self> {
        serde_json::from_str(content).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Load from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Environment name stamped on every report.
    pub environment: String,

    /// Longest string allowed anywhere in a report, in chars.
    pub max_string_length: usize,

    /// Largest serialized report, in bytes.
    pub max_payload_bytes: usize,

    /// Raw client address policy string. Interpreted by the capture layer.
    pub capture_ip: Option<String>,

    /// Header to read the client address from instead of the peer address.
    pub user_ip_header: Option<String>,

    /// Version of the reporting application.
    pub code_version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: crate::DEFAULT_ENVIRONMENT.to_string(),
            max_string_length: crate::DEFAULT_MAX_STRING_LENGTH,
            max_payload_bytes: crate::DEFAULT_MAX_PAYLOAD_BYTES,
            capture_ip: None,
            user_ip_header: None,
            code_version: None,
        }
    }
}

impl Settings {
    /// Parse and validate JSON text.
    pub fn from_json(content: &str) -> ValidationResult<Self> {
        validate_settings(SettingsFile::from_json(content)?)
    }

    /// Load and validate a JSON file. Environment overrides are not applied;
    /// see [`crate::load_settings`] for that.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        validate_settings(SettingsFile::from_file(path)?)
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }

    pub fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn with_capture_ip(mut self, capture_ip: impl Into<String>) -> Self {
        self.capture_ip = Some(capture_ip.into());
        self
    }

    pub fn with_user_ip_header(mut self, header: impl Into<String>) -> Self {
        self.user_ip_header = Some(header.into());
        self
    }

    pub fn with_code_version(mut self, code_version: impl Into<String>) -> Self {
        self.code_version = Some(code_version.into());
        self
    }
}
