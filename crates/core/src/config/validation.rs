//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no endpoint is configured, and
    /// `ConfigError::Invalid` if:
    /// - an endpoint is not an absolute http(s) URL
    /// - `bind_addr` is not a socket address
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `cache_ttl_ms`, `max_page_retries` or `default_limit` is 0
    /// - `max_pages` is 0 or exceeds 50
    /// - `default_language` or `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::Missing {
                field: "endpoints".into(),
                hint: "Set SEARCHGATE_ENDPOINTS to a list of search URLs".into(),
            });
        }
        for endpoint in &self.endpoints {
            match url::Url::parse(endpoint) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => {
                    return Err(ConfigError::Invalid {
                        field: "endpoints".into(),
                        reason: format!("unsupported scheme {} in {endpoint}", parsed.scheme()),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid { field: "endpoints".into(), reason: format!("{endpoint}: {e}") });
                }
            }
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_addr".into(),
                reason: format!("not a socket address: {}", self.bind_addr),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.cache_ttl_ms == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_ms".into(), reason: "must be greater than 0".into() });
        }

        if self.max_page_retries == 0 {
            return Err(ConfigError::Invalid {
                field: "max_page_retries".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.max_pages == 0 || self.max_pages > 50 {
            return Err(ConfigError::Invalid { field: "max_pages".into(), reason: "must be between 1 and 50".into() });
        }

        if self.default_limit == 0 {
            return Err(ConfigError::Invalid { field: "default_limit".into(), reason: "must be greater than 0".into() });
        }

        if self.default_language.is_empty() {
            return Err(ConfigError::Invalid { field: "default_language".into(), reason: "must not be empty".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.endpoints.len() == 1 {
            tracing::warn!(endpoint = %self.endpoints[0], "only one endpoint configured; endpoint failover is disabled");
        }

        Ok(())
    }
}
