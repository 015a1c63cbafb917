//! Core types and request orchestration for searchgate.
//!
//! This crate provides:
//! - The result envelope and emptiness validation
//! - Page-level and endpoint-level failover
//! - Multi-page aggregation
//! - In-memory response cache
//! - Unified error types
//! - Configuration structures

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod failover;
pub mod params;
pub mod transport;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::Aggregator;
pub use cache::ResponseCache;
pub use config::{AppConfig, ConfigError};
pub use envelope::{AggregationMeta, ResultEnvelope};
pub use error::Error;
pub use failover::{FailoverExecutor, FailoverOutcome, PageOutcome};
pub use params::SearchParams;
pub use transport::{Payload, Transport};
pub use validator::ValidationOptions;
