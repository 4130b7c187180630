//! End-to-end capture: settings, request context, assembly, bounding and
//! delivery through a sender.

use fl_capture::{context, CaptureError, Reporter, RequestSnapshot, Sender};
use fl_config::Settings;
use fl_payload::{Body, Data, Level, ParamValue};
use std::error::Error;
use std::fmt;
use std::sync::Mutex;

#[derive(Default)]
struct Recording {
    sent: Mutex<Vec<Data>>,
}

impl Sender for Recording {
    fn send(&self, data: &Data) -> fl_capture::Result<()> {
        self.sent.lock().unwrap().push(data.clone());
        Ok(())
    }
}

impl Recording {
    fn only(&self) -> Data {
        let sent = self.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "expected exactly one report");
        sent[0].clone()
    }
}

#[derive(Debug)]
struct PaymentDeclined {
    source: GatewayTimeout,
}

#[derive(Debug)]
struct GatewayTimeout;

impl fmt::Display for PaymentDeclined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment declined")
    }
}

impl fmt::Display for GatewayTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gateway timed out after 30s")
    }
}

impl Error for PaymentDeclined {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl Error for GatewayTimeout {}

fn checkout_request() -> RequestSnapshot {
    RequestSnapshot::new("POST", "https://shop.example/checkout")
        .with_header("User-Agent", "integration-test")
        .with_header("X-Forwarded-For", "2001:db8:85a3::8a2e:370:7334")
        .with_param("item", "sku-1")
        .with_param("item", "sku-2")
        .with_param("coupon", "SPRING")
        .with_remote_addr("10.1.2.3")
        .with_user_principal("alice")
}

#[test]
fn test_error_inside_request_is_reported_with_context() {
    let settings = Settings::default()
        .with_environment("staging")
        .with_capture_ip("anonymize")
        .with_user_ip_header("X-Forwarded-For");
    let reporter = Reporter::from_settings(&settings, Recording::default());

    let _guard = context::enter(checkout_request());
    let err = PaymentDeclined {
        source: GatewayTimeout,
    };
    reporter.report(&err).unwrap();

    let data = reporter.sender().only();
    assert_eq!(data.environment, "staging");
    assert_eq!(data.level, Level::Error);
    assert_eq!(data.title.as_deref(), Some("payment declined"));

    let request = data.request.as_ref().expect("request captured");
    assert_eq!(request.method(), Some("POST"));
    assert_eq!(
        request.user_ip(),
        Some("2001:db8:85a3:0000:0000:0000:0000:0000")
    );
    assert!(request.get().is_none());
    let post = request.post().expect("POST params captured");
    assert_eq!(post["coupon"], ParamValue::Single("SPRING".to_string()));
    assert_eq!(
        post["item"],
        ParamValue::Multiple(vec!["sku-1".to_string(), "sku-2".to_string()])
    );

    assert_eq!(data.person.as_ref().map(|p| p.id.as_str()), Some("alice"));

    match &data.body {
        Body::TraceChain(chain) => {
            let traces = chain.traces().expect("chain has traces");
            assert_eq!(traces.len(), 2);
            assert_eq!(
                traces[1].exception.message.as_deref(),
                Some("gateway timed out after 30s")
            );
        }
        other => panic!("expected a trace chain, got {:?}", other),
    }
}

#[test]
fn test_capture_ip_none_omits_address_from_wire() {
    let settings = Settings::default().with_capture_ip("none");
    let reporter = Reporter::from_settings(&settings, Recording::default());

    let _guard = context::enter(checkout_request());
    reporter.report_message("declined", Level::Warning).unwrap();

    let data = reporter.sender().only();
    let json = serde_json::to_value(&data).unwrap();
    assert!(json["request"].get("user_ip").is_none());
    assert_eq!(json["request"]["url"], "https://shop.example/checkout");
}

#[test]
fn test_reports_outside_request_have_no_request() {
    let reporter = Reporter::from_settings(&Settings::default(), Recording::default());
    assert!(!context::is_active());

    reporter.report_message("background job failed", Level::Critical).unwrap();

    let data = reporter.sender().only();
    assert!(data.request.is_none());
    assert!(data.person.is_none());
    assert_eq!(data.level, Level::Critical);
}

#[test]
fn test_string_limit_bounds_captured_request() {
    let settings = Settings::default().with_max_string_length(16);
    let reporter = Reporter::from_settings(&settings, Recording::default());

    let long_agent = "agent/".repeat(50);
    let _guard = context::enter(
        RequestSnapshot::new("GET", "https://shop.example/search")
            .with_header("User-Agent", long_agent.as_str())
            .with_param("q", "x".repeat(64))
            .with_remote_addr("192.0.2.10"),
    );
    reporter.report_message("y".repeat(64), Level::Info).unwrap();

    let data = reporter.sender().only();
    let request = data.request.as_ref().unwrap();
    assert_eq!(request.url(), Some("https://shop.exa"));
    assert_eq!(request.headers()["User-Agent"].chars().count(), 16);
    assert_eq!(request.get().unwrap()["q"], vec!["x".repeat(16)]);
    assert_eq!(request.user_ip(), Some("192.0.2.10"));
    match &data.body {
        Body::Message(message) => assert_eq!(message.body, "y".repeat(16)),
        other => panic!("expected a message, got {:?}", other),
    }
}

#[test]
fn test_guard_reports_once_and_returns_error() {
    let reporter = Reporter::from_settings(&Settings::default(), Recording::default());

    let result: Result<(), PaymentDeclined> = reporter.guard(|| {
        Err(PaymentDeclined {
            source: GatewayTimeout,
        })
    });

    assert_eq!(result.unwrap_err().to_string(), "payment declined");
    assert_eq!(reporter.sender().sent.lock().unwrap().len(), 1);
}

#[test]
fn test_payload_budget_error_is_surfaced() {
    let settings = Settings::default().with_max_payload_bytes(64);
    let reporter = Reporter::from_settings(&settings, Recording::default());

    let err = reporter
        .report_message("tiny budget", Level::Info)
        .unwrap_err();
    assert!(matches!(err, CaptureError::Payload(_)));
    assert!(reporter.sender().sent.lock().unwrap().is_empty());
}
