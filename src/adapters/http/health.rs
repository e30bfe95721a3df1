//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `GET /health` - always answers `{"status":"ok"}` while the process serves requests.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}
