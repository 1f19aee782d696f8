// crates/server/src/lib.rs
//! Job board server library.
//!
//! This crate provides the Axum-based HTTP server for the job board
//! gateway: a REST API exposing CRUD operations over job postings.

pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::{routing::get, Router};
use job_board_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// GET / - Plaintext greeting.
async fn greeting() -> &'static str {
    "Hello from the backend!"
}

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, job postings) under /api
/// - The plaintext greeting at /
/// - CORS (allows any origin)
/// - Request tracing
///
/// The storage client is injected here rather than read from a global.
pub fn create_app(db: Database) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(greeting))
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
