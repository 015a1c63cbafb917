//! Multi-page result aggregation.
//!
//! The aggregator owns page progression: it forces the page number on every
//! round and runs the endpoint failover in single-page-retry mode.

use serde_json::{Number, Value};

use crate::envelope::{AggregationMeta, ResultEnvelope};
use crate::failover::FailoverExecutor;
use crate::{SearchParams, Transport};

/// Default ceiling on pages fetched per aggregation.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Why an aggregation round ended the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    LimitReached,
    EmptyPage,
    NoResultsField,
    Failed,
}

/// Merges results across successive pages until a target count is reached.
#[derive(Debug, Clone)]
pub struct Aggregator {
    executor: FailoverExecutor,
    max_pages: u32,
}

impl Aggregator {
    pub fn new(executor: FailoverExecutor, max_pages: u32) -> Self {
        Self { executor: executor.with_max_page_retries(1), max_pages: max_pages.max(1) }
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch pages until `limit` results are collected.
    ///
    /// Never fails: an executor error ends the loop and whatever was
    /// accumulated so far is returned.
    pub async fn aggregate(
        &self, transport: &dyn Transport, endpoints: &[String], base: &SearchParams, limit: usize,
    ) -> ResultEnvelope {
        let mut collected: Vec<Value> = Vec::new();
        let mut template: Option<ResultEnvelope> = None;
        let mut last_page = self.max_pages;

        tracing::info!(limit, max_pages = self.max_pages, "starting search aggregation");

        for page in 1..=self.max_pages {
            let params = base.with_page(page);
            let stop = match self.executor.execute(transport, endpoints, &params).await {
                Ok(outcome) => {
                    tracing::debug!(page, endpoint = %outcome.endpoint, "aggregation page fetched");
                    let mut envelope = outcome.envelope;
                    let results = envelope.results.take();
                    template = Some(envelope);

                    match results {
                        Some(results) => {
                            let count = results.len();
                            collected.extend(results);
                            tracing::info!(page, count, total = collected.len(), "page merged");

                            if collected.len() >= limit {
                                Some(Stop::LimitReached)
                            } else if count == 0 {
                                Some(Stop::EmptyPage)
                            } else {
                                None
                            }
                        }
                        None => Some(Stop::NoResultsField),
                    }
                }
                Err(err) => {
                    tracing::error!(page, error = %err, "failed to fetch page during aggregation");
                    Some(Stop::Failed)
                }
            };

            if let Some(reason) = stop {
                tracing::info!(page, ?reason, "stopping aggregation");
                last_page = page;
                break;
            }
        }

        collected.truncate(limit);
        let returned = collected.len();
        let pages_fetched = last_page.min(self.max_pages);

        tracing::info!(requested = limit, returned, pages_fetched, "aggregation completed");

        ResultEnvelope {
            results: Some(collected),
            number_of_results: Some(Number::from(returned)),
            aggregation: Some(AggregationMeta { requested: limit, returned, pages_fetched }),
            ..template.unwrap_or_default()
        }
    }
}
