//! Client code for searchgate.
//!
//! This crate provides the HTTP transport the failover executors use to
//! reach the search backend.

pub mod transport;

pub use transport::{HttpConfig, HttpTransport, UrlError, build_request_url, classify_body};
