//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEARCHGATE_*)
//! 2. TOML config file (if SEARCHGATE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::aggregate::DEFAULT_MAX_PAGES;
use crate::cache::DEFAULT_TTL;
use crate::failover::DEFAULT_MAX_PAGE_RETRIES;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEARCHGATE_*)
/// 2. TOML config file (if SEARCHGATE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend search endpoints in failover priority order.
    ///
    /// Set via SEARCHGATE_ENDPOINTS (e.g. `["https://a/search","https://b/search"]`).
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Address the HTTP server listens on.
    ///
    /// Set via SEARCHGATE_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Per-call backend timeout in milliseconds.
    ///
    /// Set via SEARCHGATE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Response cache time-to-live in milliseconds.
    ///
    /// Set via SEARCHGATE_CACHE_TTL_MS environment variable.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Page attempts per endpoint before failing over to the next one.
    #[serde(default = "default_max_page_retries")]
    pub max_page_retries: u32,

    /// Ceiling on pages fetched by one aggregation.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Result count used when `limit` is given without a value.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// `language` sent when the caller gives none.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// User-Agent string for backend requests.
    ///
    /// Set via SEARCHGATE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://searxngmain.search1api.com/search".into(),
        "https://searxngbackup.search1api.com/search".into(),
        "https://search.search1api.com/search".into(),
    ]
}

fn default_bind_addr() -> String {
    "0.0.0.0:8787".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_cache_ttl_ms() -> u64 {
    u64::try_from(DEFAULT_TTL.as_millis()).unwrap_or(u64::MAX)
}

fn default_max_page_retries() -> u32 {
    DEFAULT_MAX_PAGE_RETRIES
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_limit() -> usize {
    10
}

fn default_language() -> String {
    "all".into()
}

fn default_user_agent() -> String {
    "searchgate/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            bind_addr: default_bind_addr(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_ms: default_cache_ttl_ms(),
            max_page_retries: default_max_page_retries(),
            max_pages: default_max_pages(),
            default_limit: default_limit(),
            default_language: default_language(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEARCHGATE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("SEARCHGATE_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}
