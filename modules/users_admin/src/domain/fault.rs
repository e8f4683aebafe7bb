//! Turns a [`Fault`] into the single line of text shown to the user.

use modkit::Problem;

use crate::contract::error::{ErrorBody, Fault};

/// Classify a fault into a display message.
///
/// Priority: network message, timeout, string payload (then `message` /
/// problem `detail` of an object payload), generic transport message,
/// `fallback`.
pub fn classify(fault: &Fault, fallback: &str) -> String {
    match fault {
        Fault::Network { message, .. } if !message.trim().is_empty() => message.clone(),
        Fault::Network { url, .. } => transport_message(url, 0, "Unknown Error"),
        Fault::Timeout { url } => transport_message(url, 0, "Timeout"),
        Fault::NotFound { url, body, .. } => {
            payload_message(body).unwrap_or_else(|| transport_message(url, 404, "Not Found"))
        }
        Fault::Service {
            url,
            status,
            status_text,
            body,
        } => payload_message(body).unwrap_or_else(|| transport_message(url, *status, status_text)),
        Fault::Unknown { .. } => fallback.to_string(),
    }
}

fn transport_message(url: &str, status: u16, status_text: &str) -> String {
    let url = if url.is_empty() { "(unknown url)" } else { url };
    format!("Http failure response for {url}: {status} {status_text}")
}

fn payload_message(body: &ErrorBody) -> Option<String> {
    let text = match body {
        ErrorBody::Empty => None,
        ErrorBody::Text(s) => Some(s.clone()),
        ErrorBody::Json(serde_json::Value::String(s)) => Some(s.clone()),
        ErrorBody::Json(v) => v
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                Problem::from_json(v).and_then(|p| p.message().map(str::to_string))
            }),
    };
    text.filter(|s| !s.trim().is_empty())
}
