// crates/db/src/jobs.rs
//! Job posting CRUD queries.
//!
//! Every operation is a single parameterized statement with no
//! transaction wrapping: concurrent writes to the same id race at the
//! storage layer with last-write-wins semantics.

use crate::{Database, DbResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A stored job posting, as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: i64,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
    pub job_description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Input for creating or fully replacing a job posting.
///
/// `job_title`, `company_name` and `location` are required; a body
/// missing any of them is rejected at deserialization. The remaining
/// fields are optional and stored as NULL when omitted — an update
/// that omits them clears them (full-replace, not merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobPosting {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for JobPosting {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        // Deadlines are stored as RFC 3339 text.
        let deadline: Option<String> = row.try_get("application_deadline")?;
        let application_deadline = deadline
            .map(|s| {
                DateTime::parse_from_rfc3339(&s).map(|d| d.with_timezone(&Utc)).map_err(|e| {
                    sqlx::Error::ColumnDecode {
                        index: "application_deadline".into(),
                        source: Box::new(e),
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            job_title: row.try_get("job_title")?,
            company_name: row.try_get("company_name")?,
            location: row.try_get("location")?,
            job_type: row.try_get("job_type")?,
            salary_range: row.try_get("salary_range")?,
            job_description: row.try_get("job_description")?,
            requirements: row.try_get("requirements")?,
            responsibilities: row.try_get("responsibilities")?,
            application_deadline,
        })
    }
}

impl Database {
    /// List all job postings, ordered by id ascending.
    pub async fn list_jobs(&self) -> DbResult<Vec<JobPosting>> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM jobs ORDER BY id ASC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(jobs)
    }

    /// Insert a new job posting and return the stored row (with its
    /// generated id).
    pub async fn create_job(&self, job: &NewJobPosting) -> DbResult<JobPosting> {
        let created = sqlx::query_as::<_, JobPosting>(
            r#"
            INSERT INTO jobs (job_title, company_name, location, job_type, salary_range,
                              job_description, requirements, responsibilities, application_deadline)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&job.job_title)
        .bind(&job.company_name)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.salary_range)
        .bind(&job.job_description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(job.application_deadline.as_ref().map(|d| d.to_rfc3339()))
        .fetch_one(self.pool())
        .await?;
        Ok(created)
    }

    /// Fetch a single job posting by id.
    pub async fn get_job(&self, id: i64) -> DbResult<Option<JobPosting>> {
        let job = sqlx::query_as::<_, JobPosting>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(job)
    }

    /// Overwrite every field of the job posting matching `id` and return
    /// the updated row, or `None` if no row matched.
    ///
    /// Full-replace contract: fields absent from `job` are written as
    /// NULL, not preserved.
    pub async fn update_job(&self, id: i64, job: &NewJobPosting) -> DbResult<Option<JobPosting>> {
        let updated = sqlx::query_as::<_, JobPosting>(
            r#"
            UPDATE jobs
            SET job_title = ?, company_name = ?, location = ?, job_type = ?, salary_range = ?,
                job_description = ?, requirements = ?, responsibilities = ?, application_deadline = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&job.job_title)
        .bind(&job.company_name)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.salary_range)
        .bind(&job.job_description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(job.application_deadline.as_ref().map(|d| d.to_rfc3339()))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(updated)
    }

    /// Delete the job posting matching `id`. Returns `true` if a row was
    /// removed, `false` if none matched.
    pub async fn delete_job(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
