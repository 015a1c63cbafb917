//! Backend request URL construction.

/// Error type for request URL construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Build the URL for one backend call.
///
/// The endpoint is trimmed and its fragment dropped; `pairs` are appended to
/// any query the endpoint already carries, form-encoded.
pub fn build_request_url(endpoint: &str, pairs: &[(String, String)]) -> Result<url::Url, UrlError> {
    let trimmed = endpoint.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);

    if !pairs.is_empty() {
        parsed
            .query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(parsed)
}
