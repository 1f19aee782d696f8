// crates/server/src/routes/health.rs
//! Health check endpoint for the API.
//!
//! The gateway keeps serving when the database is unreachable (requests
//! fail per-call), so the health payload probes storage and degrades
//! instead of failing the request.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Response for the health check endpoint.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// `"ok"` when storage is reachable, `"degraded"` otherwise.
    pub status: String,
    /// `"ok"` or `"unreachable"`.
    pub storage: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /api/health - Health check endpoint.
///
/// Returns server status, storage reachability, version, and uptime.
/// Always 200: a degraded gateway still answers.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let storage_ok = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: storage unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if storage_ok { "ok" } else { "degraded" }.to_string(),
        storage: if storage_ok { "ok" } else { "unreachable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Create the health routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
