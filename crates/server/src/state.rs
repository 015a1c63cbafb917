//! Shared application state.

use std::sync::Arc;

use searchgate_core::{Aggregator, AppConfig, FailoverExecutor, ResponseCache, Transport};

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub transport: Arc<dyn Transport>,
    pub cache: Arc<ResponseCache>,
    pub executor: FailoverExecutor,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        let executor = FailoverExecutor::new(config.timeout()).with_max_page_retries(config.max_page_retries);
        let aggregator = Aggregator::new(executor.clone(), config.max_pages);
        let cache = Arc::new(ResponseCache::new(config.cache_ttl()));

        Self { config: Arc::new(config), transport, cache, executor, aggregator }
    }
}
