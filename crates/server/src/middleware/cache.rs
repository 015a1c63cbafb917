//! Response cache middleware.
//!
//! GET requests, and POST requests (JSON bodies take part in the
//! fingerprint), are answered from the cache while an entry is fresh.
//! Successful JSON responses are stored; anything else passes through
//! untouched. Cache failures never fail the request.

use std::sync::Arc;

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use searchgate_core::ResponseCache;
use searchgate_core::cache::compute_fingerprint;

/// Largest request body read for fingerprinting.
const MAX_REQUEST_BODY: usize = 1024 * 1024;

pub async fn cache_responses(State(cache): State<Arc<ResponseCache>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    if method != Method::GET && method != Method::POST {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().unwrap_or_default().to_string();

    let is_json_post = method == Method::POST
        && parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

    let (fingerprint, body) = if is_json_post {
        let bytes = match to_bytes(body, MAX_REQUEST_BODY).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read request body");
                return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
            }
        };
        (compute_fingerprint(method.as_str(), &path, &query, Some(&bytes)), Body::from(bytes))
    } else {
        (compute_fingerprint(method.as_str(), &path, &query, None), body)
    };
    let request = Request::from_parts(parts, body);

    cache.sweep_expired().await;

    if let Some(payload) = cache.get(&fingerprint).await {
        tracing::debug!(%fingerprint, "cache hit");
        return json_response(payload);
    }

    let response = next.run(request).await;

    if !response.status().is_success() {
        tracing::debug!(%fingerprint, status = response.status().as_u16(), "not caching non-successful response");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(%fingerprint, error = %e, "failed to buffer response for caching");
            parts.headers.remove(header::CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    if serde_json::from_slice::<serde::de::IgnoredAny>(&bytes).is_ok() {
        cache.put(&fingerprint, bytes.clone()).await;
    } else {
        tracing::debug!(%fingerprint, "cannot parse response as JSON");
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn json_response(payload: Bytes) -> Response {
    ([(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))], payload).into_response()
}
