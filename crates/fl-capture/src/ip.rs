//! Client address capture policy.
//!
//! Applied once per captured request, before the address enters the report
//! tree. Unrecognised address formats pass through unchanged so that a
//! strange value never blocks the report itself.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Setting value that selects [`CaptureIp::Full`].
pub const CAPTURE_IP_FULL: &str = "full";
/// Setting value that selects [`CaptureIp::Anonymize`].
pub const CAPTURE_IP_ANONYMIZE: &str = "anonymize";
/// Setting value that selects [`CaptureIp::None`].
pub const CAPTURE_IP_NONE: &str = "none";

const IPV6_ZEROED_SUFFIX: &str = ":0000:0000:0000:0000:0000";

/// How much of the client address to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureIp {
    /// Keep the address as captured.
    #[default]
    Full,
    /// Keep the network prefix and zero the rest.
    Anonymize,
    /// Drop the address.
    None,
}

impl CaptureIp {
    /// Parse an exact setting value.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            CAPTURE_IP_FULL => Some(CaptureIp::Full),
            CAPTURE_IP_ANONYMIZE => Some(CaptureIp::Anonymize),
            CAPTURE_IP_NONE => Some(CaptureIp::None),
            _ => None,
        }
    }

    /// Mode for a configured value. Unset or unrecognised means `Full`.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None => CaptureIp::Full,
            Some(raw) => CaptureIp::parse_str(raw).unwrap_or_else(|| {
                if !raw.is_empty() {
                    warn!(value = raw, "unrecognised capture_ip, capturing full address");
                }
                CaptureIp::Full
            }),
        }
    }

    /// Apply this policy to a raw address. See [`redact`].
    pub fn redact(&self, raw: Option<&str>) -> Option<String> {
        redact(raw, *self)
    }
}

impl std::fmt::Display for CaptureIp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaptureIp::Full => CAPTURE_IP_FULL,
            CaptureIp::Anonymize => CAPTURE_IP_ANONYMIZE,
            CaptureIp::None => CAPTURE_IP_NONE,
        };
        write!(f, "{}", s)
    }
}

/// Apply the capture policy to a raw client address.
///
/// A missing address stays missing in every mode.
///
/// `Anonymize` treats anything containing `.` as IPv4 and keeps the first
/// three segments (`a.b.c.0`); otherwise anything containing `:` is IPv6 and
/// keeps the first three groups followed by five zero groups. The IPv6 form
/// is fixed-width and does not expand `::`. Values with fewer than three
/// segments, or with neither separator, pass through unchanged.
pub fn redact(raw: Option<&str>, mode: CaptureIp) -> Option<String> {
    let raw = raw?;
    match mode {
        CaptureIp::Full => Some(raw.to_string()),
        CaptureIp::None => None,
        CaptureIp::Anonymize => Some(anonymize(raw)),
    }
}

fn anonymize(raw: &str) -> String {
    if raw.contains('.') {
        match leading_segments(raw, '.') {
            Some([a, b, c]) => format!("{}.{}.{}.0", a, b, c),
            None => raw.to_string(),
        }
    } else if raw.contains(':') {
        match leading_segments(raw, ':') {
            Some([a, b, c]) => format!("{}:{}:{}{}", a, b, c, IPV6_ZEROED_SUFFIX),
            None => raw.to_string(),
        }
    } else {
        raw.to_string()
    }
}

/// First three segments of `raw`, or `None` when there are fewer than three.
///
/// Trailing empty segments do not count, so `"10.0."` has two segments.
fn leading_segments(raw: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts: Vec<&str> = raw.split(separator).collect();
    while parts.last() == Some(&"") {
        parts.pop();
    }
    match parts.as_slice() {
        [a, b, c, ..] => Some([*a, *b, *c]),
        _ => None,
    }
}
