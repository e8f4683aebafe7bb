use serde::{Deserialize, Serialize};

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// RFC 9457 Problem Details for HTTP APIs.
///
/// Every member is optional on the wire; services frequently send only
/// `title`/`status` or only `detail`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: String,
    /// A URI reference that identifies the specific occurrence of the problem.
    pub instance: String,
    /// Optional machine-readable error code defined by the application.
    pub code: String,
    /// Optional request id useful for tracing.
    pub request_id: Option<String>,
}

impl Problem {
    /// Try to read a problem document out of an arbitrary JSON value.
    /// Objects carrying neither `title` nor `detail` are not treated as problems.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        if !obj.contains_key("title") && !obj.contains_key("detail") {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// The most specific human-readable text: `detail`, then `title`.
    pub fn message(&self) -> Option<&str> {
        [self.detail.as_str(), self.title.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }
}
