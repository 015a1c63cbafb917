//! HTTP middleware.

pub mod cache;

pub use cache::cache_responses;
