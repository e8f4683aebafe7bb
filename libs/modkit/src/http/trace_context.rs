//! W3C trace-context propagation for outgoing requests.
//!
//! Headers are written by hand so the client does not depend on a particular
//! OpenTelemetry SDK version.

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::Span;

/// W3C Trace Context header name
pub(crate) const TRACEPARENT: &str = "traceparent";

/// Write a `traceparent` for the given span, keeping an existing one untouched.
pub(crate) fn inject_trace_context(headers: &mut HeaderMap, span: &Span) {
    if headers.contains_key(TRACEPARENT) {
        return;
    }

    // Span ids are process-local; fold them into the parent-id slot when available.
    let span_id = span
        .id()
        .map(|id| id.into_u64())
        .unwrap_or_else(rand::random::<u64>);
    let trace_id = rand::random::<u128>();
    let traceparent = format!("00-{trace_id:032x}-{span_id:016x}-01");

    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(HeaderName::from_static(TRACEPARENT), value);
    }
}
