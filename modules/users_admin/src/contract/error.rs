use std::fmt;
use thiserror::Error;

/// Body of a failed response, as far as it could be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Empty,
    /// Non-JSON text.
    Text(String),
    Json(serde_json::Value),
}

impl ErrorBody {
    /// Interpret raw response text: JSON when it parses, plain text otherwise.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(v) => Self::Json(v),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Empty => f.write_str("<empty>"),
            ErrorBody::Text(s) => f.write_str(s),
            ErrorBody::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Every way a collection call can fail.
///
/// Faults travel to the caller unmodified; turning them into user-facing text
/// is the job of `domain::fault::classify`.
#[derive(Error, Debug, Clone)]
pub enum Fault {
    /// No response reached the client (connection refused, DNS, TLS, ...).
    #[error("network failure calling {url}: {message}")]
    Network { url: String, message: String },

    /// The transport gave up waiting; no status code was received.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("user not found: {id}")]
    NotFound {
        id: String,
        url: String,
        body: ErrorBody,
    },

    /// Non-2xx response.
    #[error("{url} answered {status} {status_text}: {body}")]
    Service {
        url: String,
        status: u16,
        status_text: String,
        body: ErrorBody,
    },

    #[error("unexpected failure: {message}")]
    Unknown { message: String },
}

impl Fault {
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    pub fn service(
        url: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: ErrorBody,
    ) -> Self {
        Self::Service {
            url: url.into(),
            status,
            status_text: status_text.into(),
            body,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Transport status code; `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            Fault::NotFound { .. } => 404,
            Fault::Service { status, .. } => *status,
            Fault::Network { .. } | Fault::Timeout { .. } | Fault::Unknown { .. } => 0,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Fault::NotFound { .. })
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Network { .. } => "network",
            Fault::Timeout { .. } => "timeout",
            Fault::NotFound { .. } => "not_found",
            Fault::Service { .. } => "service",
            Fault::Unknown { .. } => "unknown",
        }
    }
}
