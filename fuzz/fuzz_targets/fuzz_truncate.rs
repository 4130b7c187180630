//! Fuzz target for report tree truncation.
//!
//! Builds a report from arbitrary strings and checks that every string in
//! the truncated body respects the limit and the chain shape survives.

#![no_main]

use arbitrary::Arbitrary;
use fl_payload::{truncate, Body, Data, ExceptionInfo, Frame, Trace, TraceChain};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    max_length: u8,
    null_chain: bool,
    traces: Vec<(String, Vec<String>)>,
    title: Option<String>,
}

fn strings_within(value: &serde_json::Value, max: usize) -> bool {
    match value {
        serde_json::Value::String(s) => s.chars().count() <= max,
        serde_json::Value::Array(items) => items.iter().all(|v| strings_within(v, max)),
        serde_json::Value::Object(map) => map.values().all(|v| strings_within(v, max)),
        _ => true,
    }
}

fuzz_target!(|input: Input| {
    let max = input.max_length as usize;
    let chain = if input.null_chain {
        TraceChain::builder().no_traces().build()
    } else {
        let traces = input
            .traces
            .iter()
            .map(|(message, files)| {
                let mut trace = Trace::new(ExceptionInfo::new("FuzzError").with_message(message.clone()));
                for file in files {
                    trace.push_frame(Frame::new(file.clone()));
                }
                trace
            })
            .collect();
        TraceChain::builder().traces(traces).build()
    };

    let mut data = Data::new("fuzz", Body::TraceChain(chain.clone()));
    data.title = input.title;

    let out = truncate(&data, max);
    let Body::TraceChain(out_chain) = &out.body else {
        panic!("body variant changed");
    };
    assert_eq!(out_chain.traces().is_none(), chain.traces().is_none());
    assert_eq!(
        out_chain.traces().map(<[Trace]>::len),
        chain.traces().map(<[Trace]>::len)
    );

    let body = serde_json::to_value(&out.body).unwrap();
    assert!(strings_within(&body, max));
    if let Some(title) = &out.title {
        assert!(title.chars().count() <= max);
    }
});
