//! # ModKit
//!
//! Shared building blocks for modules that talk to remote HTTP services:
//!
//! - [`TracedClient`]: `reqwest` wrapper that opens an `outgoing_http` span per
//!   request and propagates a W3C `traceparent` header.
//! - [`Problem`]: RFC 9457 problem details, used to read structured error
//!   bodies returned by services.

pub mod api;
pub mod http;

pub use api::problem::{Problem, APPLICATION_PROBLEM_JSON};
pub use http::client::TracedClient;
