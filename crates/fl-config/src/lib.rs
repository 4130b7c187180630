//! faultline settings loading and validation.
//!
//! This crate provides:
//! - The [`Settings`] consumed by capture and truncation
//! - Settings file resolution (explicit path → env → XDG → system → defaults)
//! - Environment overrides and validation
//!
//! Settings are immutable once loaded. Reconfiguring means loading a new
//! value and swapping it in whole.

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{load_settings, resolve_settings_path, ConfigSource};
pub use settings::{Settings, SettingsFile};
pub use validate::{ValidationError, ValidationResult};

/// Default maximum string length, in chars.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1024;

/// Default serialized payload budget, in bytes.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 512 * 1024;

/// Default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "production";
