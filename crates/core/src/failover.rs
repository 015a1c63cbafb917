//! Page-level and endpoint-level failover.
//!
//! Attempts are strictly sequential: each one completes (success, error or
//! timeout) before the next is started, and endpoints are tried in the order
//! given.

use std::time::Duration;

use crate::validator::{self, ValidationOptions};
use crate::{Error, ResultEnvelope, SearchParams, Transport};

/// Default number of page attempts per endpoint.
pub const DEFAULT_MAX_PAGE_RETRIES: u32 = 2;

/// Successful page-level attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub envelope: ResultEnvelope,
    /// Attempt number that succeeded. Equals the page sent unless the params pin one.
    pub page: u32,
}

/// Successful endpoint-level execution.
#[derive(Debug, Clone, PartialEq)]
pub struct FailoverOutcome {
    pub envelope: ResultEnvelope,
    pub endpoint: String,
    pub page: u32,
}

enum PageAttempt {
    Trying { page: u32, last_failure: Option<Error> },
    Success(PageOutcome),
    Exhausted(Error),
}

/// Runs a search against a prioritized endpoint list.
#[derive(Debug, Clone)]
pub struct FailoverExecutor {
    max_page_retries: u32,
    timeout: Duration,
    validation: ValidationOptions,
}

impl FailoverExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { max_page_retries: DEFAULT_MAX_PAGE_RETRIES, timeout, validation: ValidationOptions::default() }
    }

    /// Page attempts per endpoint; at least one is always made.
    pub fn with_max_page_retries(mut self, max_page_retries: u32) -> Self {
        self.max_page_retries = max_page_retries.max(1);
        self
    }

    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.validation = validation;
        self
    }

    pub fn max_page_retries(&self) -> u32 {
        self.max_page_retries
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Try each endpoint in order until one yields a non-empty result.
    ///
    /// # Errors
    ///
    /// Returns `Error::EndpointFailoverExhausted` if every endpoint fails.
    pub async fn execute(
        &self, transport: &dyn Transport, endpoints: &[String], params: &SearchParams,
    ) -> Result<FailoverOutcome, Error> {
        let mut failures = Vec::new();

        for endpoint in endpoints {
            match self.execute_endpoint(transport, endpoint, params).await {
                Ok(PageOutcome { envelope, page }) => {
                    tracing::info!(endpoint = %endpoint, page, "request succeeded");
                    return Ok(FailoverOutcome { envelope, endpoint: endpoint.clone(), page });
                }
                Err(err) => {
                    tracing::warn!(endpoint = %endpoint, error = %err, "all requests to endpoint failed");
                    failures.push((endpoint.clone(), err));
                }
            }
        }

        let err = Error::EndpointFailoverExhausted { failures };
        tracing::error!("{err}");
        Err(err)
    }

    /// Try successive pages against one endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::PageFailoverExhausted` carrying the most informative
    /// failure once every attempt has failed.
    pub async fn execute_endpoint(
        &self, transport: &dyn Transport, endpoint: &str, params: &SearchParams,
    ) -> Result<PageOutcome, Error> {
        let mut state = PageAttempt::Trying { page: 1, last_failure: None };

        loop {
            state = match state {
                PageAttempt::Trying { page, last_failure } if page > self.max_page_retries => {
                    let source = last_failure.unwrap_or(Error::EmptyResult { page: page - 1 });
                    PageAttempt::Exhausted(Error::PageFailoverExhausted {
                        endpoint: endpoint.to_string(),
                        source: Box::new(source),
                    })
                }
                PageAttempt::Trying { page, last_failure } => {
                    match self.attempt(transport, endpoint, page, params).await {
                        Ok(envelope) => PageAttempt::Success(PageOutcome { envelope, page }),
                        Err(err) => PageAttempt::Trying { page: page + 1, last_failure: Some(prefer(last_failure, err)) },
                    }
                }
                PageAttempt::Success(outcome) => return Ok(outcome),
                PageAttempt::Exhausted(err) => return Err(err),
            };
        }
    }

    async fn attempt(
        &self, transport: &dyn Transport, endpoint: &str, attempt: u32, params: &SearchParams,
    ) -> Result<ResultEnvelope, Error> {
        let page = params.page_for_attempt(attempt);
        tracing::info!(endpoint = %endpoint, page, "attempting request");

        let payload = match tokio::time::timeout(self.timeout, transport.send(endpoint, page, params)).await {
            Ok(Ok(payload)) => payload,
            Ok(Err(err)) => {
                tracing::warn!(endpoint = %endpoint, page, error = %err, "request failed");
                return Err(err);
            }
            Err(_) => {
                let err = Error::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX));
                tracing::warn!(endpoint = %endpoint, page, error = %err, "request failed");
                return Err(err);
            }
        };

        let envelope = payload.into_envelope();
        if validator::is_empty(envelope.as_ref(), &self.validation) {
            tracing::info!(endpoint = %endpoint, page, "empty result, trying next page");
            return Err(Error::EmptyResult { page });
        }

        envelope.ok_or(Error::EmptyResult { page })
    }
}

/// Keep a transport failure over a later synthetic empty-result signal.
fn prefer(previous: Option<Error>, current: Error) -> Error {
    match previous {
        Some(prev) if current.is_empty_signal() && !prev.is_empty_signal() => prev,
        _ => current,
    }
}
