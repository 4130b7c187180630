//! Settings file discovery and environment overrides.
//!
//! Resolution order: explicit path → environment variables → XDG paths →
//! system path → defaults.

use crate::validate::{validate_settings, ValidationError, ValidationResult};
use crate::{Settings, SettingsFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the settings file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided by the caller.
    Explicit,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/faultline/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "FAULTLINE_CONFIG";
pub const ENV_CONFIG_DIR: &str = "FAULTLINE_CONFIG_DIR";
pub const ENV_ENVIRONMENT: &str = "FAULTLINE_ENVIRONMENT";
pub const ENV_MAX_STRING_LENGTH: &str = "FAULTLINE_MAX_STRING_LENGTH";
pub const ENV_CAPTURE_IP: &str = "FAULTLINE_CAPTURE_IP";
pub const ENV_USER_IP_HEADER: &str = "FAULTLINE_USER_IP_HEADER";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "faultline.json";

/// Application name for XDG directories.
const APP_NAME: &str = "faultline";

/// Find the settings file.
///
/// 1. Explicit path (if provided and it exists)
/// 2. `FAULTLINE_CONFIG`
/// 3. `FAULTLINE_CONFIG_DIR` + `faultline.json`
/// 4. XDG config directory (`~/.config/faultline/`)
/// 5. System config (`/etc/faultline/`)
/// 6. Built-in defaults (`None`)
pub fn resolve_settings_path(explicit: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    if let Some(path) = explicit {
        if path.exists() {
            return (Some(path.to_path_buf()), ConfigSource::Explicit);
        }
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(SETTINGS_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::XdgConfig);
        }
    }

    let system_path = PathBuf::from("/etc").join(APP_NAME).join(SETTINGS_FILENAME);
    if system_path.exists() {
        return (Some(system_path), ConfigSource::SystemConfig);
    }

    (None, ConfigSource::BuiltinDefault)
}

/// Resolve, load, override from the environment and validate.
pub fn load_settings(explicit: Option<&Path>) -> ValidationResult<(Settings, ConfigSource)> {
    let (path, source) = resolve_settings_path(explicit);
    let mut file = match path {
        Some(ref path) => SettingsFile::from_file(path)?,
        None => SettingsFile::default(),
    };
    debug!(source = %source, path = ?path, "resolved settings file");

    apply_env_overrides(&mut file)?;
    let settings = validate_settings(file)?;
    Ok((settings, source))
}

/// Overlay `FAULTLINE_*` variables onto a parsed settings file.
pub fn apply_env_overrides(file: &mut SettingsFile) -> ValidationResult<()> {
    if let Ok(environment) = std::env::var(ENV_ENVIRONMENT) {
        file.environment = Some(environment);
    }

    if let Ok(raw) = std::env::var(ENV_MAX_STRING_LENGTH) {
        let parsed = raw.trim().parse::<i64>().map_err(|e| ValidationError::InvalidValue {
            field: ENV_MAX_STRING_LENGTH.to_string(),
            message: format!("'{}': {}", raw, e),
        })?;
        file.max_string_length = Some(parsed);
    }

    if let Ok(capture_ip) = std::env::var(ENV_CAPTURE_IP) {
        file.capture_ip = Some(capture_ip);
    }

    if let Ok(header) = std::env::var(ENV_USER_IP_HEADER) {
        file.user_ip_header = Some(header);
    }

    Ok(())
}

/// Get the XDG config directory for faultline.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Explicit), "explicit path");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_default_source() {
        assert_eq!(ConfigSource::default(), ConfigSource::BuiltinDefault);
    }
}
