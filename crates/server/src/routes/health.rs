//! Liveness endpoint.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", message: "Search API gateway is running", timestamp: Utc::now().to_rfc3339() })
}
