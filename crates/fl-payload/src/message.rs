//! Plain-text message bodies.

use crate::truncate::{rewrap, truncate_str, Truncatable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A report body that carries only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub body: String,
}

impl Message {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Truncatable for Message {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        rewrap(self, truncate_str(&self.body, max_length), |body| Message { body })
    }
}
