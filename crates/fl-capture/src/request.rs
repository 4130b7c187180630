//! Captures the current HTTP request into the report.

use crate::context;
use crate::{CaptureIp, HttpRequest, Provider};
use fl_config::Settings;
use fl_payload::{ParamValue, Request};
use std::collections::BTreeMap;

/// Builds [`Request`] nodes from the thread's current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestProvider {
    user_ip_header: Option<String>,
    capture_ip: CaptureIp,
}

impl RequestProvider {
    pub fn builder() -> RequestProviderBuilder {
        RequestProviderBuilder::default()
    }

    /// Provider configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut builder = Self::builder().capture_ip(settings.capture_ip.as_deref());
        if let Some(ref header) = settings.user_ip_header {
            builder = builder.user_ip_header(header.clone());
        }
        builder.build()
    }

    pub fn capture_ip(&self) -> CaptureIp {
        self.capture_ip
    }

    pub fn user_ip_header(&self) -> Option<&str> {
        self.user_ip_header.as_deref()
    }

    /// Capture a specific request.
    pub fn capture(&self, req: &dyn HttpRequest) -> Request {
        Request::builder()
            .url(req.url())
            .method(req.method())
            .headers(req.headers())
            .get(get_params(req))
            .post(post_params(req))
            .query_string(req.query_string().map(str::to_string))
            .user_ip(self.user_ip(req))
            .build()
    }

    /// Client address after the capture policy.
    ///
    /// With a header configured the address comes only from that header;
    /// the peer address is not used as a fallback.
    fn user_ip(&self, req: &dyn HttpRequest) -> Option<String> {
        let raw = match self.user_ip_header.as_deref() {
            Some(name) if !name.is_empty() => req.header(name),
            _ => req.remote_addr(),
        };
        self.capture_ip.redact(raw)
    }
}

impl Provider<Request> for RequestProvider {
    fn provide(&self) -> Option<Request> {
        context::with_current(|req| req.map(|r| self.capture(r)))
    }
}

fn get_params(req: &dyn HttpRequest) -> Option<BTreeMap<String, Vec<String>>> {
    if req.method().eq_ignore_ascii_case("GET") {
        Some(params(req))
    } else {
        None
    }
}

fn post_params(req: &dyn HttpRequest) -> Option<BTreeMap<String, ParamValue>> {
    if req.method().eq_ignore_ascii_case("POST") {
        Some(
            params(req)
                .into_iter()
                .map(|(name, values)| (name, ParamValue::from_values(values)))
                .collect(),
        )
    } else {
        None
    }
}

/// Parameters that carry at least one value.
fn params(req: &dyn HttpRequest) -> BTreeMap<String, Vec<String>> {
    req.parameters()
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .collect()
}

/// Builder for [`RequestProvider`].
#[derive(Debug, Clone, Default)]
pub struct RequestProviderBuilder {
    user_ip_header: Option<String>,
    capture_ip: CaptureIp,
}

impl RequestProviderBuilder {
    /// Header to read the client address from.
    pub fn user_ip_header(mut self, name: impl Into<String>) -> Self {
        self.user_ip_header = Some(name.into());
        self
    }

    /// Capture policy by setting value: `full`, `anonymize` or `none`.
    /// Missing or unrecognised values mean `full`.
    pub fn capture_ip(mut self, value: Option<&str>) -> Self {
        self.capture_ip = CaptureIp::from_setting(value);
        self
    }

    pub fn capture_ip_mode(mut self, mode: CaptureIp) -> Self {
        self.capture_ip = mode;
        self
    }

    pub fn build(self) -> RequestProvider {
        RequestProvider {
            user_ip_header: self.user_ip_header,
            capture_ip: self.capture_ip,
        }
    }
}
