//! API route handlers for the job board server.

pub mod health;
pub mod jobs;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET    /api/health    - Health check
/// - GET    /api/jobs      - List all job postings
/// - POST   /api/jobs      - Create a job posting
/// - GET    /api/jobs/{id} - Get a job posting by id
/// - PUT    /api/jobs/{id} - Replace a job posting in full
/// - DELETE /api/jobs/{id} - Delete a job posting
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", jobs::router())
        .with_state(state)
}
