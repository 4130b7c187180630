//! Report capture for faultline.
//!
//! This crate sits between a web integration and the report tree:
//!
//! - **IP capture policy**: [`CaptureIp`] and [`redact`] decide how much of a
//!   client address may leave the process (`full`, `anonymize` or `none`).
//! - **Request capture**: the integration enters the [`HttpRequest`] being
//!   handled with [`context::enter`]; [`RequestProvider`] and
//!   [`PersonProvider`] read it while a report is assembled.
//! - **Assembly**: [`ReportBuilder`] collects provider output into a
//!   [`fl_payload::Data`] tree and bounds it.
//! - **Delivery**: [`Reporter`] hands bounded reports to a [`Sender`].
//!
//! # Example
//!
//! ```
//! use fl_capture::{context, CaptureIp, ReportBuilder, RequestSnapshot};
//! use fl_config::Settings;
//! use fl_payload::Level;
//!
//! let settings = Settings::default().with_capture_ip("anonymize");
//! let builder = ReportBuilder::from_settings(&settings);
//!
//! let _guard = context::enter(
//!     RequestSnapshot::new("GET", "https://example.com/").with_remote_addr("203.0.113.7"),
//! );
//! let data = builder.message("something broke", Level::Error).unwrap();
//! assert_eq!(data.request.unwrap().user_ip(), Some("203.0.113.0"));
//! assert_eq!(CaptureIp::from_setting(Some("none")), CaptureIp::None);
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod ip;
pub mod person;
pub mod provider;
pub mod reporter;
pub mod request;
pub mod source;

pub use builder::ReportBuilder;
pub use error::{CaptureError, Result};
pub use ip::{redact, CaptureIp, CAPTURE_IP_ANONYMIZE, CAPTURE_IP_FULL, CAPTURE_IP_NONE};
pub use person::PersonProvider;
pub use provider::Provider;
pub use reporter::{Reporter, Sender};
pub use request::{RequestProvider, RequestProviderBuilder};
pub use source::{HttpRequest, RequestSnapshot};
