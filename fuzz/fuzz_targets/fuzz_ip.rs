//! Fuzz target for client address anonymization.

#![no_main]

use fl_capture::{redact, CaptureIp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw: &str| {
    let full = redact(Some(raw), CaptureIp::Full);
    assert_eq!(full.as_deref(), Some(raw));
    assert_eq!(redact(Some(raw), CaptureIp::None), None);
    let _ = redact(Some(raw), CaptureIp::Anonymize);
});
