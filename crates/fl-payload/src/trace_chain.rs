//! Cause chains.

use crate::truncate::{is_owned, Truncatable};
use crate::Trace;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;

/// An ordered chain of traces, outer error first and innermost cause last.
///
/// `traces` is `None` when no chain was captured and `Some(vec![])` when a
/// chain was captured but held nothing. The two states are kept apart through
/// every transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceChain {
    traces: Option<Vec<Trace>>,
}

impl TraceChain {
    /// Start a new builder.
    pub fn builder() -> TraceChainBuilder {
        TraceChainBuilder::default()
    }

    /// A builder initialised from this chain.
    pub fn to_builder(&self) -> TraceChainBuilder {
        TraceChainBuilder {
            traces: self.traces.clone(),
        }
    }

    /// The traces, if a chain was captured.
    pub fn traces(&self) -> Option<&[Trace]> {
        self.traces.as_deref()
    }

    /// Build a chain from an error and every error reachable through
    /// [`Error::source`].
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut traces = Vec::new();
        let mut current = Some(error);
        while let Some(err) = current {
            traces.push(Trace::from_error(err));
            current = err.source();
        }
        Self::builder().traces(traces).build()
    }
}

impl Truncatable for TraceChain {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let traces = match self.traces.as_deref() {
            None | Some([]) => return Cow::Borrowed(self),
            Some(traces) => traces,
        };

        // Each trace truncates itself; the chain only reassembles the results.
        let truncated: Vec<Cow<'_, Trace>> = traces
            .iter()
            .map(|trace| trace.truncate_strings(max_length))
            .collect();

        if !truncated.iter().any(is_owned) {
            return Cow::Borrowed(self);
        }

        let traces = truncated.into_iter().map(Cow::into_owned).collect();
        Cow::Owned(self.to_builder().traces(traces).build())
    }
}

/// Builder for [`TraceChain`].
#[derive(Debug, Clone, Default)]
pub struct TraceChainBuilder {
    traces: Option<Vec<Trace>>,
}

impl TraceChainBuilder {
    /// The traces making up the chain.
    pub fn traces(mut self, traces: Vec<Trace>) -> Self {
        self.traces = Some(traces);
        self
    }

    /// Mark the chain as not captured.
    pub fn no_traces(mut self) -> Self {
        self.traces = None;
        self
    }

    pub fn build(self) -> TraceChain {
        TraceChain {
            traces: self.traces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExceptionInfo;

    fn trace(message: &str) -> Trace {
        Trace::new(ExceptionInfo::new("Error").with_message(message))
    }

    #[test]
    fn test_absent_traces_stay_absent() {
        let chain = TraceChain::builder().build();
        let out = chain.truncate_strings(0);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(out.traces().is_none());
    }

    #[test]
    fn test_empty_traces_stay_empty() {
        let chain = TraceChain::builder().traces(Vec::new()).build();
        let out = chain.truncate_strings(0);
        assert!(matches!(out, Cow::Borrowed(c) if std::ptr::eq(c, &chain)));
        assert_eq!(out.traces(), Some(&[][..]));
    }

    #[test]
    fn test_chain_order_preserved() {
        let chain = TraceChain::builder()
            .traces(vec![trace("outer error"), trace("inner cause")])
            .build();
        let out = chain.truncate_strings(5);
        let traces = out.traces().unwrap();

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].exception.message.as_deref(), Some("outer"));
        assert_eq!(traces[1].exception.message.as_deref(), Some("inner"));
    }

    #[test]
    fn test_original_chain_untouched() {
        let chain = TraceChain::builder().traces(vec![trace("abcdefgh")]).build();
        let _ = chain.truncate_strings(2);
        assert_eq!(
            chain.traces().unwrap()[0].exception.message.as_deref(),
            Some("abcdefgh")
        );
    }

    #[test]
    fn test_serializes_as_list_or_null() {
        let absent = TraceChain::builder().build();
        assert_eq!(serde_json::to_string(&absent).unwrap(), "null");

        let empty = TraceChain::builder().traces(Vec::new()).build();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");
    }

    #[derive(Debug)]
    struct Wrapped(Inner);

    #[derive(Debug)]
    struct Inner;

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "request failed")
        }
    }

    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "connection reset")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    impl Error for Inner {}

    #[test]
    fn test_from_error_walks_sources() {
        let chain = TraceChain::from_error(&Wrapped(Inner));
        let traces = chain.traces().unwrap();

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].exception.class_name, "Wrapped");
        assert_eq!(traces[0].exception.message.as_deref(), Some("request failed"));
        assert_eq!(traces[1].exception.class_name, "Inner");
    }
}
