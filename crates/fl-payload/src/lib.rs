//! Report tree for faultline.
//!
//! A report is an immutable tree rooted at [`Data`]. Before a report leaves
//! the process its strings are bounded with [`Truncatable`], and optionally
//! the whole encoding is fitted to a byte budget with [`PayloadTruncator`].
//!
//! # Example
//!
//! ```
//! use fl_payload::{Body, ExceptionInfo, Trace, TraceChain, Truncatable};
//!
//! let chain = TraceChain::builder()
//!     .traces(vec![
//!         Trace::new(ExceptionInfo::new("Error").with_message("x".repeat(500))),
//!         Trace::new(ExceptionInfo::new("Error").with_message("y".repeat(500))),
//!     ])
//!     .build();
//!
//! let truncated = chain.truncate_strings(100);
//! let traces = truncated.traces().unwrap();
//! assert_eq!(traces.len(), 2);
//! assert_eq!(traces[0].exception.message.as_deref(), Some("x".repeat(100).as_str()));
//! ```

pub mod body;
pub mod data;
pub mod error;
pub mod frame;
pub mod level;
pub mod message;
pub mod person;
pub mod request;
pub mod size;
pub mod trace;
pub mod trace_chain;
pub mod truncate;

pub use body::Body;
pub use data::{Data, LANGUAGE};
pub use error::{PayloadError, Result};
pub use frame::Frame;
pub use level::Level;
pub use message::Message;
pub use person::Person;
pub use request::{ParamValue, Request, RequestBuilder};
pub use size::{PayloadTruncator, Strategy, DEFAULT_MAX_PAYLOAD_BYTES};
pub use trace::{ExceptionInfo, Trace};
pub use trace_chain::{TraceChain, TraceChainBuilder};
pub use truncate::{truncate, truncate_str, Truncatable};
