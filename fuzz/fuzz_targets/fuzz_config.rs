//! Fuzz target for settings file parsing and validation.
//!
//! Arbitrary bytes must produce either settings or a validation error,
//! never a panic.

#![no_main]

use fl_config::Settings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(settings) = Settings::from_json(content) {
            assert!(settings.max_payload_bytes > 0);
            assert!(!settings.environment.is_empty());
        }
    }
});
