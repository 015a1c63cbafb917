//! `/search` handler.
//!
//! Forwards the caller's query parameters through endpoint failover. A
//! `limit` parameter switches the request to multi-page aggregation, which
//! owns paging, so any caller `pageno` is dropped unparsed.

use axum::Json;
use axum::extract::{Query, State};

use searchgate_core::params::PAGE_PARAM;
use searchgate_core::{Error, ResultEnvelope, SearchParams};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn search(
    State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    let limit = pairs.iter().rev().find(|(k, _)| k == "limit").map(|(_, v)| v.clone());
    let aggregating = limit.is_some();
    let pairs = pairs
        .into_iter()
        .filter(|(k, _)| k != "limit" && !(aggregating && k == PAGE_PARAM));

    let mut params = SearchParams::from_pairs(pairs)?;
    params.set_default("language", &state.config.default_language);

    tracing::info!(query = params.query().unwrap_or_default(), "forwarding search request");

    if let Some(raw) = limit {
        let limit = parse_limit(&raw, state.config.default_limit)?;
        let envelope = state
            .aggregator
            .aggregate(state.transport.as_ref(), &state.config.endpoints, &params, limit)
            .await;
        return Ok(Json(envelope));
    }

    let outcome = state
        .executor
        .execute(state.transport.as_ref(), &state.config.endpoints, &params)
        .await?;

    tracing::info!(endpoint = %outcome.endpoint, page = outcome.page, "successfully used endpoint");
    Ok(Json(outcome.envelope))
}

/// Parse the `limit` parameter; an empty value means the default.
fn parse_limit(raw: &str, default: usize) -> Result<usize, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    match raw.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(Error::InvalidInput(format!("invalid limit: {raw:?}"))),
    }
}
