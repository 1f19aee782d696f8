// crates/db/src/migrations.rs
//! Inline SQL migrations for the job board schema.
//!
//! We use simple inline migrations rather than sqlx migration files
//! because the schema is a single table and self-contained.

use crate::DbResult;
use sqlx::SqlitePool;

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: jobs table
    r#"
CREATE TABLE IF NOT EXISTS jobs (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    job_title            TEXT NOT NULL,
    company_name         TEXT NOT NULL,
    location             TEXT NOT NULL,
    job_type             TEXT,
    salary_range         TEXT,
    job_description      TEXT,
    requirements         TEXT,
    responsibilities     TEXT,
    application_deadline TEXT
);
"#,
];

/// Apply any migrations newer than the recorded schema version.
pub(crate) async fn run(pool: &SqlitePool) -> DbResult<()> {
    // Ensure the migration-tracking table exists
    sqlx::query("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")
        .execute(pool)
        .await?;

    // Find the highest version already applied (0 if none)
    let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _migrations")
        .fetch_one(pool)
        .await?;
    let current_version = row.0 as usize;

    // Run only new migrations
    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = i + 1; // 1-based
        if version > current_version {
            sqlx::query(migration).execute(pool).await?;
            sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
                .bind(version as i64)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
