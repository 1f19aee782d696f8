// crates/server/src/main.rs
//! Job board server binary.
//!
//! Reads its configuration from the environment once at startup, opens
//! the database lazily, and starts serving. An unreachable database at
//! startup is logged but does not prevent the server from binding —
//! requests simply fail per-call until the storage layer recovers.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use job_board_db::Database;
use job_board_server::create_app;
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 5000;

/// Default database file path.
const DEFAULT_DB_PATH: &str = "data/jobs.db";

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("JOB_BOARD_PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get the database file path from environment or use default.
fn get_db_path() -> PathBuf {
    std::env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH))
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Open the database without connecting; the pool establishes
    // connections on first use.
    let db_path = get_db_path();
    let db = Database::open_lazy(&db_path)?;

    // Startup probe: connect and migrate. Failure is logged, not fatal —
    // requests will fail per-call until the database becomes reachable.
    if let Err(e) = db.ensure_ready().await {
        tracing::warn!(
            path = %db_path.display(),
            error = %e,
            "Database not reachable at startup; continuing anyway"
        );
    }

    let app = create_app(db);

    let port = get_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server is running");

    axum::serve(listener, app).await?;

    Ok(())
}
