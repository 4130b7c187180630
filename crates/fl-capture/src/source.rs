//! The incoming request a report is captured from.

use std::collections::BTreeMap;

/// Read access to the HTTP request being handled.
///
/// Web-framework integrations implement this over their own request type.
pub trait HttpRequest {
    /// Full request URL.
    fn url(&self) -> String;

    /// HTTP method, as sent.
    fn method(&self) -> &str;

    /// First value of a header. Names compare case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Every header name with its first value.
    fn headers(&self) -> BTreeMap<String, String>;

    /// Query and form parameters, each with all of its values.
    fn parameters(&self) -> BTreeMap<String, Vec<String>>;

    /// Raw query string, without the leading `?`.
    fn query_string(&self) -> Option<&str>;

    /// Transport-level peer address.
    fn remote_addr(&self) -> Option<&str>;

    /// Name of the authenticated user, if any.
    fn user_principal(&self) -> Option<&str> {
        None
    }
}

/// An owned copy of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    parameters: Vec<(String, String)>,
    query_string: Option<String>,
    remote_addr: Option<String>,
    user_principal: Option<String>,
}

impl RequestSnapshot {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    /// Add a header. Repeated names keep every value; lookups see the first.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add one value of a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn with_user_principal(mut self, user: impl Into<String>) -> Self {
        self.user_principal = Some(user.into());
        self
    }
}

impl HttpRequest for RequestSnapshot {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn headers(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (name, value) in &self.headers {
            out.entry(name.clone()).or_insert_with(|| value.clone());
        }
        out
    }

    fn parameters(&self) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in &self.parameters {
            out.entry(name.clone()).or_default().push(value.clone());
        }
        out
    }

    fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    fn user_principal(&self) -> Option<&str> {
        self.user_principal.as_deref()
    }
}
