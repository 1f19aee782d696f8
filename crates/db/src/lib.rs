// crates/db/src/lib.rs
//! SQLite storage layer for the job board gateway.
//!
//! Owns the connection pool and the five job-posting queries. The
//! `Database` handle is cheap to clone (it wraps an `SqlitePool`) and is
//! constructed once in `main`, then injected into the HTTP state — there
//! is no process-wide singleton.

pub mod jobs;
mod migrations;

pub use jobs::{JobPosting, NewJobPosting};

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database handle wrapping a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl Database {
    /// Open the database at the given path without connecting.
    ///
    /// The pool is lazy: the file is created and the first connection
    /// established on first use, so an unreachable database at startup
    /// does not prevent the server from binding. Call [`ensure_ready`]
    /// afterwards to probe connectivity and run migrations.
    ///
    /// [`ensure_ready`]: Database::ensure_ready
    pub fn open_lazy(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30))
            .log_slow_statements(
                tracing::log::LevelFilter::Warn,
                std::time::Duration::from_secs(5),
            );

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_lazy_with(options);

        Ok(Self {
            pool,
            db_path: path.to_owned(),
        })
    }

    /// Probe connectivity and bring the schema up to date.
    pub async fn ensure_ready(&self) -> DbResult<()> {
        self.run_migrations().await?;
        info!("Database ready at {}", self.db_path.display());
        Ok(())
    }

    /// Create an in-memory database (for testing).
    ///
    /// Uses `shared_cache(true)` so all pool connections share the same
    /// in-memory database. Without this, each connection gets its own
    /// separate database, breaking concurrent queries.
    pub async fn new_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .shared_cache(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let db = Self {
            pool,
            db_path: PathBuf::new(),
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// The underlying connection pool. Each query checks a connection out
    /// and returns it when the future completes, on error paths included.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Cheap connectivity probe (`SELECT 1`).
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Path to the database file (empty for in-memory databases).
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn run_migrations(&self) -> DbResult<()> {
        migrations::run(&self.pool).await
    }
}
