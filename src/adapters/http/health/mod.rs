//! Liveness probe.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::state::GymAppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - Public; never touches the database.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn health_routes() -> Router<GymAppState> {
    Router::new().route("/health", get(health))
}
