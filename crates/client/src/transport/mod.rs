//! HTTP transport to the search backend.
//!
//! ### Request
//! - `GET <endpoint>?<params>&pageno=<n>`
//! - `Content-Type: application/json`, configured User-Agent
//! - Bounded by the configured timeout; expiry maps to `Error::Timeout`
//!
//! ### Response
//! - JSON (by content type) objects become envelopes
//! - Anything else is passed through as text
//! - Non-2xx statuses are logged; the body is classified like any other

pub mod url;

use std::time::{Duration, Instant};

use reqwest::{Client, header};
use serde_json::Value;

pub use self::url::{UrlError, build_request_url};

use searchgate_core::{Error, Payload, ResultEnvelope, SearchParams, Transport};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent string (default: "searchgate/0.1")
    pub user_agent: String,

    /// Request timeout (default: 10s)
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { user_agent: "searchgate/0.1".to_string(), timeout: Duration::from_millis(10_000) }
    }
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: HttpConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            Error::Transport(format!("network error: {}", err))
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &str, page: u32, params: &SearchParams) -> Result<Payload, Error> {
        let start = Instant::now();
        let url = build_request_url(endpoint, &params.query_pairs(page)).map_err(|e| Error::Transport(e.to_string()))?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, page, status = status.as_u16(), "backend returned non-success status");
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(
            "fetched {} in {}ms ({} bytes, status {})",
            url,
            start.elapsed().as_millis(),
            bytes.len(),
            status.as_u16()
        );

        classify_body(content_type.as_deref(), &bytes)
    }
}

/// Turn a response body into a payload.
///
/// # Errors
///
/// Returns `Error::Transport` when a JSON content type carries a body that is
/// not valid JSON.
pub fn classify_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Payload, Error> {
    let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

    if !is_json {
        return Ok(Payload::Text(String::from_utf8_lossy(bytes).into_owned()));
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| Error::Transport(format!("invalid JSON body: {}", e)))?;

    match ResultEnvelope::from_value(value) {
        Some(envelope) => Ok(Payload::Envelope(envelope)),
        None => Ok(Payload::Text(String::from_utf8_lossy(bytes).into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.user_agent, "searchgate/0.1");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }

    #[tokio::test]
    async fn test_http_transport_new() {
        let transport = HttpTransport::new(HttpConfig::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_classify_json_envelope() {
        let body = br#"{"query":"rust","results":[{"title":"x"}]}"#;
        let payload = classify_body(Some("application/json; charset=utf-8"), body).unwrap();
        let envelope = payload.as_envelope().unwrap();
        assert_eq!(envelope.results().len(), 1);
    }

    #[test]
    fn test_classify_text() {
        let payload = classify_body(Some("text/html"), b"<html>Too many requests</html>").unwrap();
        assert_eq!(payload, Payload::Text("<html>Too many requests</html>".to_string()));

        let payload = classify_body(None, br#"{"results":[]}"#).unwrap();
        assert!(payload.as_envelope().is_none());
    }

    #[test]
    fn test_classify_non_object_json() {
        let payload = classify_body(Some("application/json"), b"null").unwrap();
        assert_eq!(payload, Payload::Text("null".to_string()));
    }

    #[test]
    fn test_classify_malformed_json() {
        let result = classify_body(Some("application/json"), b"{not json");
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_send_to_invalid_endpoint() {
        let transport = HttpTransport::new(HttpConfig::default()).unwrap();
        let params = SearchParams::from_pairs([("q", "rust")]).unwrap();
        let result = transport.send("ftp://example.com/search", 1, &params).await;
        assert!(matches!(result, Err(Error::Transport(msg)) if msg.contains("unsupported scheme")));
    }
}
