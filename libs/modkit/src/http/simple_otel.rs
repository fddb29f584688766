//! Minimal W3C trace-context propagation for outgoing requests.
//!
//! Headers are written by hand so the crate does not depend on an
//! OpenTelemetry SDK.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// W3C Trace Context header name
pub const TRACEPARENT: &str = "traceparent";

/// Build a fresh `traceparent` value: version 00, random trace/span ids, sampled.
pub fn new_traceparent() -> String {
    let trace_id = format!("{:032x}", rand::random::<u128>());
    let span_id = format!("{:016x}", rand::random::<u64>());
    format!("00-{trace_id}-{span_id}-01")
}

/// Inject a trace context into outgoing headers unless the caller already set one.
pub fn inject_trace_context(headers: &mut HeaderMap) {
    if headers.contains_key(TRACEPARENT) {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(&new_traceparent()) {
        headers.insert(HeaderName::from_static(TRACEPARENT), value);
    }
}
