//! The HTTP request that was being handled when a report was captured.

use crate::truncate::{
    is_owned, opt_into_owned, opt_owned, truncate_list_map, truncate_map_values, truncate_opt,
    truncate_str, Truncatable,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A POST parameter value. Single values are kept unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    /// Collapse a one-element list to a single value.
    pub fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            ParamValue::Single(values.remove(0))
        } else {
            ParamValue::Multiple(values)
        }
    }

    fn truncate_strings(&self, max_length: usize) -> Option<ParamValue> {
        match self {
            ParamValue::Single(value) => match truncate_str(value, max_length) {
                Cow::Borrowed(_) => None,
                Cow::Owned(value) => Some(ParamValue::Single(value)),
            },
            ParamValue::Multiple(values) => {
                let truncated: Vec<Cow<'_, str>> =
                    values.iter().map(|v| truncate_str(v, max_length)).collect();
                if !truncated.iter().any(is_owned) {
                    return None;
                }
                Some(ParamValue::Multiple(
                    truncated.into_iter().map(Cow::into_owned).collect(),
                ))
            }
        }
    }
}

/// Captured request data.
///
/// Built through [`RequestBuilder`]; fields are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,

    #[serde(rename = "GET", skip_serializing_if = "Option::is_none")]
    get: Option<BTreeMap<String, Vec<String>>>,

    #[serde(rename = "POST", skip_serializing_if = "Option::is_none")]
    post: Option<BTreeMap<String, ParamValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    query_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    user_ip: Option<String>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// A builder initialised from this request.
    pub fn to_builder(&self) -> RequestBuilder {
        RequestBuilder {
            inner: self.clone(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn get(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.get.as_ref()
    }

    pub fn post(&self) -> Option<&BTreeMap<String, ParamValue>> {
        self.post.as_ref()
    }

    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// Client address after the capture policy was applied.
    pub fn user_ip(&self) -> Option<&str> {
        self.user_ip.as_deref()
    }
}

impl Truncatable for Request {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let url = truncate_opt(&self.url, max_length);
        let method = truncate_opt(&self.method, max_length);
        let headers = truncate_map_values(&self.headers, max_length);
        let get = self.get.as_ref().map(|g| truncate_list_map(g, max_length));
        let post = self.post.as_ref().and_then(|p| truncate_post(p, max_length));
        let query_string = truncate_opt(&self.query_string, max_length);
        let user_ip = truncate_opt(&self.user_ip, max_length);

        if !opt_owned(&url)
            && !opt_owned(&method)
            && !is_owned(&headers)
            && !opt_owned(&get)
            && post.is_none()
            && !opt_owned(&query_string)
            && !opt_owned(&user_ip)
        {
            return Cow::Borrowed(self);
        }

        Cow::Owned(Request {
            url: opt_into_owned(url),
            method: opt_into_owned(method),
            headers: headers.into_owned(),
            get: get.map(Cow::into_owned),
            post: post.or_else(|| self.post.clone()),
            query_string: opt_into_owned(query_string),
            user_ip: opt_into_owned(user_ip),
        })
    }
}

/// Truncated copy of the POST map, or `None` when nothing changed.
fn truncate_post(
    post: &BTreeMap<String, ParamValue>,
    max_length: usize,
) -> Option<BTreeMap<String, ParamValue>> {
    let mut changed = false;
    let truncated: BTreeMap<String, ParamValue> = post
        .iter()
        .map(|(k, v)| {
            let value = match v.truncate_strings(max_length) {
                Some(value) => {
                    changed = true;
                    value
                }
                None => v.clone(),
            };
            (k.clone(), value)
        })
        .collect();
    changed.then_some(truncated)
}

/// Builder for [`Request`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    inner: Request,
}

impl RequestBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.inner.method = Some(method.into());
        self
    }

    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.inner.headers = headers;
        self
    }

    /// GET parameters; `None` when the request was not a GET.
    pub fn get(mut self, get: Option<BTreeMap<String, Vec<String>>>) -> Self {
        self.inner.get = get;
        self
    }

    /// POST parameters; `None` when the request was not a POST.
    pub fn post(mut self, post: Option<BTreeMap<String, ParamValue>>) -> Self {
        self.inner.post = post;
        self
    }

    pub fn query_string(mut self, query_string: Option<String>) -> Self {
        self.inner.query_string = query_string;
        self
    }

    pub fn user_ip(mut self, user_ip: Option<String>) -> Self {
        self.inner.user_ip = user_ip;
        self
    }

    pub fn build(self) -> Request {
        self.inner
    }
}
