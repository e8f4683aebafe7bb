//! HTTP utilities for modkit

pub mod client;
mod trace_context;
