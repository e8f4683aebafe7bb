//! Traced HTTP client.
//!
//! Wraps `reqwest::Client` so every outgoing request gets its own span and a
//! `traceparent` header for distributed tracing.

use std::time::Duration;

use crate::http::trace_context;
use tracing::{field, Instrument, Level};

/// A `reqwest::Client` wrapper that traces each outgoing request.
#[derive(Clone, Debug)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Build a client whose requests fail with a timeout error after `timeout`.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(Self::new)
    }

    /// Execute a built request inside an `outgoing_http` span, injecting trace headers.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO,
            "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = field::Empty,
            error = field::Empty,
            otel.kind = "client",
        );
        trace_context::inject_trace_context(req.headers_mut(), &span);

        let result = self.inner.execute(req).instrument(span.clone()).await;

        match &result {
            Ok(response) => {
                let status = response.status();
                span.record("http.status_code", status.as_u16());
                if status.is_client_error() || status.is_server_error() {
                    span.record("error", true);
                }
            }
            Err(_) => {
                span.record("error", true);
            }
        }

        result
    }

    /// Start a request builder on the wrapped client; send it with [`TracedClient::execute`].
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
