//! HTTP routes.
//!
//! `/` reports liveness; `/search` is guarded by the response cache.

pub mod health;
pub mod search;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cache_responses;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let search_routes = Router::new()
        .route("/search", get(search::search))
        .route_layer(axum::middleware::from_fn_with_state(state.cache.clone(), cache_responses));

    Router::new()
        .route("/", get(health::health))
        .merge(search_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
