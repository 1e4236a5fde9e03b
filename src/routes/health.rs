// src/routes/health.rs
//! Health check endpoint for the dashboard.
//!
//! Defines the `/health` route used by container orchestrators and CI
//! pipelines to verify that the service is up. The response also says whether
//! the reading store handle obtained at startup is connected; a disconnected
//! store is still a healthy service that simply has no data.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
}

/// Handle `GET /health`.
///
/// Does not touch the store itself, only the handle's state.
async fn health(State((store, _config)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: if store.is_connected() {
            "connected"
        } else {
            "disconnected"
        },
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
