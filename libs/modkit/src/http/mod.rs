//! HTTP utilities for modkit
//!
//! Outgoing client wrapper and the trace-context helpers it relies on.

pub mod client;
pub mod simple_otel;
