//! Report bodies.

use crate::truncate::{rewrap, Truncatable};
use crate::{Message, Trace, TraceChain};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;

/// The main content of a report. Exactly one variant is present.
///
/// Serializes under its key name: `{"trace": ...}`, `{"trace_chain": [...]}`
/// or `{"message": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    /// A single exception.
    Trace(Trace),
    /// An exception with its causes.
    TraceChain(TraceChain),
    /// A log-style message.
    Message(Message),
}

impl Body {
    /// Key name used on the wire.
    pub fn key_name(&self) -> &'static str {
        match self {
            Body::Trace(_) => "trace",
            Body::TraceChain(_) => "trace_chain",
            Body::Message(_) => "message",
        }
    }

    /// Body for an error. Errors with a source become a chain.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        if error.source().is_some() {
            Body::TraceChain(TraceChain::from_error(error))
        } else {
            Body::Trace(Trace::from_error(error))
        }
    }

    /// Body for a plain message.
    pub fn message(body: impl Into<String>) -> Self {
        Body::Message(Message::new(body))
    }
}

impl Truncatable for Body {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        match self {
            Body::Trace(trace) => rewrap(self, trace.truncate_strings(max_length), Body::Trace),
            Body::TraceChain(chain) => {
                rewrap(self, chain.truncate_strings(max_length), Body::TraceChain)
            }
            Body::Message(message) => {
                rewrap(self, message.truncate_strings(max_length), Body::Message)
            }
        }
    }
}
