//! # ModKit - shared plumbing for flights modules
//!
//! - [`TracedClient`]: outgoing HTTP with a span per call and W3C `traceparent` propagation
//! - [`shutdown::wait_for_shutdown`]: OS signal waiter used for graceful shutdown

// HTTP utilities
pub mod http;
pub use http::client::TracedClient;

pub mod shutdown;
