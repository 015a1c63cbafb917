//! Unified error types for searchgate.
//!
//! Failover recovers from every variant locally except the two
//! `*Exhausted` ones, which are the only errors a caller ever observes.

/// Unified error types for the search front.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Forwarded call exceeded its deadline (milliseconds).
    #[error("FETCH_TIMEOUT: request timeout after {0}ms")]
    Timeout(u64),

    /// Network or protocol failure while reaching an endpoint.
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// A page produced no usable content.
    #[error("EMPTY_RESULT: empty result with pageno={page}")]
    EmptyResult { page: u32 },

    /// Every page attempt against one endpoint failed.
    #[error("PAGES_EXHAUSTED: all page retries failed for {endpoint}: {source}")]
    PageFailoverExhausted {
        endpoint: String,
        #[source]
        source: Box<Error>,
    },

    /// Every endpoint failed. The message lists addresses only.
    #[error("ENDPOINTS_EXHAUSTED: all endpoints failed: {}", endpoint_list(.failures))]
    EndpointFailoverExhausted { failures: Vec<(String, Error)> },

    /// Malformed caller input.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),
}

fn endpoint_list(failures: &[(String, Error)]) -> String {
    failures
        .iter()
        .map(|(endpoint, _)| endpoint.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// True for the synthetic "no usable content" marker.
    pub fn is_empty_signal(&self) -> bool {
        matches!(self, Error::EmptyResult { .. })
    }

    /// True when the failure came from the transport rather than the validator.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_contains_ms() {
        let err = Error::Timeout(10_000);
        assert!(err.to_string().contains("10000ms"));
        assert!(err.to_string().contains("FETCH_TIMEOUT"));
    }

    #[test]
    fn test_endpoint_exhausted_lists_addresses_only() {
        let err = Error::EndpointFailoverExhausted {
            failures: vec![
                ("https://a.example/search".into(), Error::Timeout(500)),
                ("https://b.example/search".into(), Error::Transport("connection refused".into())),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("https://a.example/search, https://b.example/search"));
        assert!(!msg.contains("connection refused"));
        assert!(!msg.contains("500ms"));
    }

    #[test]
    fn test_page_exhausted_carries_source() {
        let err = Error::PageFailoverExhausted {
            endpoint: "https://a.example/search".into(),
            source: Box::new(Error::EmptyResult { page: 2 }),
        };
        assert!(err.to_string().contains("pageno=2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_classification() {
        assert!(Error::EmptyResult { page: 1 }.is_empty_signal());
        assert!(!Error::Timeout(1).is_empty_signal());
        assert!(Error::Timeout(1).is_transport());
        assert!(Error::Transport("x".into()).is_transport());
        assert!(!Error::InvalidInput("x".into()).is_transport());
    }
}
