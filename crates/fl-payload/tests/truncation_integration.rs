//! Integration tests for report truncation.

use fl_payload::{
    truncate, Body, Data, ExceptionInfo, Frame, Level, ParamValue, Person, Request, Trace,
    TraceChain, Truncatable,
};
use std::borrow::Cow;
use std::collections::BTreeMap;

fn message_trace(message: String) -> Trace {
    Trace::new(ExceptionInfo::new("IllegalState").with_message(message))
        .with_frames(vec![Frame::new("src/handler.rs").with_line(42).with_method("handle")])
}

#[test]
fn test_two_trace_chain_truncated_to_100() {
    let first = "a".repeat(250) + &"b".repeat(250);
    let second = "c".repeat(500);
    let chain = TraceChain::builder()
        .traces(vec![message_trace(first.clone()), message_trace(second.clone())])
        .build();

    let out = chain.truncate_strings(100);
    let traces = out.traces().expect("chain captured");

    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0].exception.message.as_deref(), Some(&first[..100]));
    assert_eq!(traces[1].exception.message.as_deref(), Some(&second[..100]));
    assert_eq!(traces[0].frames, chain.traces().unwrap()[0].frames);
}

#[test]
fn test_null_traces_survive_full_report() {
    let data = Data::new("production", Body::TraceChain(TraceChain::builder().build()));
    let out = truncate(&data, 10);

    match &out.body {
        Body::TraceChain(chain) => assert!(chain.traces().is_none()),
        other => panic!("unexpected body {:?}", other),
    }
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn test_zero_length_empties_every_string() {
    let mut headers = BTreeMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());
    let mut post = BTreeMap::new();
    post.insert("q".to_string(), ParamValue::Single("search".to_string()));

    let request = Request::builder()
        .url("https://example.com/")
        .method("POST")
        .headers(headers)
        .post(Some(post))
        .user_ip(Some("198.51.100.0".to_string()))
        .build();

    let data = Data::new("production", Body::Trace(message_trace("boom".to_string())))
        .with_title("boom")
        .with_level(Level::Critical)
        .with_request(Some(request))
        .with_person(Some(Person::new("42").with_email("a@example.com")));

    let out = data.truncate_strings(0).into_owned();

    assert_eq!(out.environment, "");
    assert_eq!(out.title.as_deref(), Some(""));
    let request = out.request.as_ref().unwrap();
    assert_eq!(request.url(), Some(""));
    assert_eq!(request.headers()["Host"], "");
    assert_eq!(request.post().unwrap()["q"], ParamValue::Single(String::new()));
    assert_eq!(out.person.as_ref().unwrap().email.as_deref(), Some(""));
    match &out.body {
        Body::Trace(t) => {
            assert_eq!(t.exception.class_name, "");
            assert_eq!(t.frames[0].line_number, Some(42));
        }
        other => panic!("unexpected body {:?}", other),
    }
    assert_eq!(out.level, Level::Critical);
    assert_eq!(out.uuid, data.uuid);
}

#[test]
fn test_input_tree_never_mutated() {
    let data = Data::new("production", Body::message("x".repeat(300)));
    let snapshot = data.clone();
    let _ = data.truncate_strings(5);
    assert_eq!(data, snapshot);
}

#[test]
fn test_wire_shape_of_truncated_chain() {
    let chain = TraceChain::builder()
        .traces(vec![message_trace("z".repeat(20))])
        .build();
    let data = Data::new("production", Body::TraceChain(chain));
    let out = data.truncate_strings(3);
    let json = serde_json::to_value(out.as_ref()).unwrap();

    assert_eq!(json["body"]["trace_chain"][0]["exception"]["message"], "zzz");
    assert_eq!(json["body"]["trace_chain"][0]["frames"][0]["lineno"], 42);
}
