//! Fitting a report into a serialized byte budget.
//!
//! Strategies run in order and stop as soon as the JSON encoding fits. The
//! string strategies are plain [`Truncatable`] passes at shrinking limits.
//! The frame strategy drops the middle of long frame lists and is the only
//! transform here that changes child counts.

use crate::truncate::Truncatable;
use crate::{Body, Data, PayloadError, Result, Trace};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Default serialized size limit (512 KiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 512 * 1024;

/// String limits tried in order by [`PayloadTruncator::default`].
pub const STRING_THRESHOLDS: [usize; 3] = [1024, 512, 256];

/// Frames kept at each end of a long trace.
pub const FRAMES_KEPT_PER_END: usize = 10;

/// One way of shrinking a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Truncate every string to this many chars.
    Strings(usize),
    /// Keep only the first `head` and last `tail` frames of each trace.
    Frames { head: usize, tail: usize },
}

impl Strategy {
    /// Apply the strategy to a report.
    pub fn apply<'a>(&self, data: &'a Data) -> Cow<'a, Data> {
        match *self {
            Strategy::Strings(max_length) => data.truncate_strings(max_length),
            Strategy::Frames { head, tail } => match trim_body_frames(&data.body, head, tail) {
                Cow::Borrowed(_) => Cow::Borrowed(data),
                Cow::Owned(body) => Cow::Owned(Data {
                    body,
                    ..data.clone()
                }),
            },
        }
    }
}

/// Applies [`Strategy`] values until a report fits a byte budget.
#[derive(Debug, Clone)]
pub struct PayloadTruncator {
    max_bytes: usize,
    strategies: Vec<Strategy>,
}

impl Default for PayloadTruncator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_BYTES, usize::MAX)
    }
}

impl PayloadTruncator {
    /// Create a truncator with the standard strategy ladder.
    ///
    /// String thresholds above `max_string_length` are skipped, since the
    /// per-string pass has already enforced that bound.
    pub fn new(max_bytes: usize, max_string_length: usize) -> Self {
        let mut strategies: Vec<Strategy> = STRING_THRESHOLDS
            .iter()
            .copied()
            .filter(|limit| *limit < max_string_length)
            .map(Strategy::Strings)
            .collect();
        strategies.push(Strategy::Frames {
            head: FRAMES_KEPT_PER_END,
            tail: FRAMES_KEPT_PER_END,
        });
        Self {
            max_bytes,
            strategies,
        }
    }

    /// Create a truncator with an explicit strategy list.
    pub fn with_strategies(max_bytes: usize, strategies: Vec<Strategy>) -> Self {
        Self {
            max_bytes,
            strategies,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Shrink `data` until its JSON encoding is at most `max_bytes`.
    pub fn fit(&self, data: Data) -> Result<Data> {
        let mut size = data.encoded_len()?;
        if size <= self.max_bytes {
            trace!(size, limit = self.max_bytes, "payload within budget");
            return Ok(data);
        }

        let mut current = data;
        for strategy in &self.strategies {
            let next = match strategy.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            current = next;
            size = current.encoded_len()?;
            debug!(?strategy, size, limit = self.max_bytes, "applied payload strategy");
            if size <= self.max_bytes {
                return Ok(current);
            }
        }

        Err(PayloadError::BudgetExceeded {
            size,
            limit: self.max_bytes,
        })
    }
}

fn trim_body_frames(body: &Body, head: usize, tail: usize) -> Cow<'_, Body> {
    match body {
        Body::Trace(t) => match trim_trace_frames(t, head, tail) {
            Some(t) => Cow::Owned(Body::Trace(t)),
            None => Cow::Borrowed(body),
        },
        Body::TraceChain(chain) => {
            let traces = match chain.traces() {
                Some(traces) if !traces.is_empty() => traces,
                _ => return Cow::Borrowed(body),
            };
            let trimmed: Vec<Option<Trace>> = traces
                .iter()
                .map(|t| trim_trace_frames(t, head, tail))
                .collect();
            if trimmed.iter().all(Option::is_none) {
                return Cow::Borrowed(body);
            }
            let traces = trimmed
                .into_iter()
                .zip(traces)
                .map(|(trimmed, original)| trimmed.unwrap_or_else(|| original.clone()))
                .collect();
            Cow::Owned(Body::TraceChain(
                chain.to_builder().traces(traces).build(),
            ))
        }
        Body::Message(_) => Cow::Borrowed(body),
    }
}

fn trim_trace_frames(trace: &Trace, head: usize, tail: usize) -> Option<Trace> {
    let count = trace.frames.len();
    let kept = head.saturating_add(tail);
    if count <= kept {
        return None;
    }
    let mut frames = Vec::with_capacity(kept);
    frames.extend_from_slice(&trace.frames[..head]);
    frames.extend_from_slice(&trace.frames[count - tail..]);
    Some(Trace {
        frames,
        exception: trace.exception.clone(),
    })
}
