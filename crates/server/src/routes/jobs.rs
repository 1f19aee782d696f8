// crates/server/src/routes/jobs.rs
//! Job posting resource routes.
//!
//! Each handler is one stateless request/response exchange backed by a
//! single parameterized query. There is no cross-request memory and no
//! transaction wrapping; concurrent writes to the same id resolve
//! last-write-wins at the storage layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use job_board_db::{JobPosting, NewJobPosting};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Confirmation body for DELETE (the deleted record is not returned).
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct DeleteResponse {
    pub message: String,
}

/// Reject bodies whose required fields are present but blank.
///
/// Missing required fields never reach here: body deserialization
/// already rejects them with a 400-class response.
fn validate(job: &NewJobPosting) -> ApiResult<()> {
    for (field, value) in [
        ("jobTitle", &job.job_title),
        ("companyName", &job.company_name),
        ("location", &job.location),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{field} must not be blank")));
        }
    }
    Ok(())
}

/// GET /api/jobs - List all job postings, ordered by id ascending.
///
/// No pagination or filtering; the full set is returned.
async fn list_jobs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<JobPosting>>> {
    let jobs = state.db.list_jobs().await?;
    Ok(Json(jobs))
}

/// POST /api/jobs - Create a job posting.
///
/// Returns 201 with the stored record, including its generated id.
async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewJobPosting>,
) -> ApiResult<(StatusCode, Json<JobPosting>)> {
    validate(&body)?;
    let created = state.db.create_job(&body).await?;
    tracing::info!(job_id = created.id, "Job posting created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/jobs/{id} - Fetch a single job posting.
async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<JobPosting>> {
    let job = state.db.get_job(id).await?.ok_or(ApiError::JobNotFound(id))?;
    Ok(Json(job))
}

/// PUT /api/jobs/{id} - Replace a job posting in full.
///
/// Full-replace contract: every field is overwritten, and optional
/// fields omitted from the body are cleared to null rather than kept.
async fn update_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewJobPosting>,
) -> ApiResult<Json<JobPosting>> {
    validate(&body)?;
    let updated = state
        .db
        .update_job(id, &body)
        .await?
        .ok_or(ApiError::JobNotFound(id))?;
    tracing::info!(job_id = id, "Job posting updated");
    Ok(Json(updated))
}

/// DELETE /api/jobs/{id} - Remove a job posting.
///
/// Returns a confirmation message, not the deleted record.
async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    if !state.db.delete_job(id).await? {
        return Err(ApiError::JobNotFound(id));
    }
    tracing::info!(job_id = id, "Job posting deleted");
    Ok(Json(DeleteResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

/// Create the job posting routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(update_job).delete(delete_job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use job_board_db::Database;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::new_in_memory().await.expect("in-memory DB");
        let state = AppState::new(db);
        Router::new().nest("/api", router()).with_state(state)
    }

    async fn request(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn full_body() -> Value {
        json!({
            "jobTitle": "Backend Engineer",
            "companyName": "Acme Corp",
            "location": "Remote",
            "jobType": "full-time",
            "salaryRange": "$120k - $150k",
            "jobDescription": "Build and maintain backend services.",
            "requirements": "3+ years of Rust",
            "responsibilities": "Own the storage layer.",
            "applicationDeadline": "2026-10-01T12:00:00Z"
        })
    }

    fn minimal_body(title: &str) -> Value {
        json!({
            "jobTitle": title,
            "companyName": "Acme Corp",
            "location": "Remote"
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_and_round_trips() {
        let app = test_app().await;

        let (status, created) = request(&app, "POST", "/api/jobs", Some(full_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].is_i64());
        assert_eq!(created["jobTitle"], "Backend Engineer");
        assert_eq!(created["companyName"], "Acme Corp");
        assert_eq!(created["salaryRange"], "$120k - $150k");

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_missing_required_field_is_rejected() {
        let app = test_app().await;

        // No "location" — body deserialization fails with a 400-class code.
        let body = json!({ "jobTitle": "Dev", "companyName": "Acme" });
        let (status, _) = request(&app, "POST", "/api/jobs", Some(body)).await;
        assert!(status.is_client_error(), "expected 4xx, got {status}");
    }

    #[tokio::test]
    async fn test_create_blank_required_field_returns_400() {
        let app = test_app().await;

        let (status, body) = request(&app, "POST", "/api/jobs", Some(minimal_body("   "))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request");
        assert!(body["details"].as_str().unwrap().contains("jobTitle"));
    }

    #[tokio::test]
    async fn test_get_missing_id_returns_404_not_500() {
        let app = test_app().await;

        for id in [1, 42, 9_999_999] {
            let (status, body) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Job posting not found");
        }
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_client_error() {
        let app = test_app().await;
        let (status, _) = request(&app, "GET", "/api/jobs/not-a-number", None).await;
        assert!(status.is_client_error(), "expected 4xx, got {status}");
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let app = test_app().await;

        let (_, created) = request(&app, "POST", "/api/jobs", Some(full_body())).await;
        let id = created["id"].as_i64().unwrap();

        // Replacement supplies only the required fields.
        let (status, updated) = request(
            &app,
            "PUT",
            &format!("/api/jobs/{id}"),
            Some(minimal_body("Retitled")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["jobTitle"], "Retitled");

        // Every omitted optional field must come back null, not preserved.
        let (_, fetched) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
        assert_eq!(fetched["jobTitle"], "Retitled");
        for field in [
            "jobType",
            "salaryRange",
            "jobDescription",
            "requirements",
            "responsibilities",
            "applicationDeadline",
        ] {
            assert!(fetched[field].is_null(), "{field} should be cleared");
        }
    }

    #[tokio::test]
    async fn test_update_missing_id_returns_404() {
        let app = test_app().await;

        let (status, body) = request(
            &app,
            "PUT",
            "/api/jobs/123",
            Some(minimal_body("Nobody")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job posting not found");
    }

    #[tokio::test]
    async fn test_delete_then_get_returns_404() {
        let app = test_app().await;

        let (_, created) = request(&app, "POST", "/api/jobs", Some(minimal_body("Doomed"))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = request(&app, "DELETE", &format!("/api/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Job deleted successfully");

        let (status, _) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_id_returns_404_and_mutates_nothing() {
        let app = test_app().await;

        let (_, created) = request(&app, "POST", "/api/jobs", Some(minimal_body("Survivor"))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, _) = request(&app, "DELETE", &format!("/api/jobs/{}", id + 1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_contains_created_records() {
        let app = test_app().await;

        let mut ids = Vec::new();
        for i in 0..3 {
            let (_, created) =
                request(&app, "POST", "/api/jobs", Some(minimal_body(&format!("Job {i}")))).await;
            ids.push(created["id"].as_i64().unwrap());
        }

        let (status, listed) = request(&app, "GET", "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed_ids: Vec<i64> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_i64().unwrap())
            .collect();
        for id in ids {
            assert!(listed_ids.contains(&id));
        }
    }

    #[tokio::test]
    async fn test_list_empty_returns_empty_array() {
        let app = test_app().await;
        let (status, listed) = request(&app, "GET", "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_concurrent_update_and_delete_settle_last_write_wins() {
        let app = test_app().await;

        let (_, created) = request(&app, "POST", "/api/jobs", Some(full_body())).await;
        let id = created["id"].as_i64().unwrap();

        let update_app = app.clone();
        let delete_app = app.clone();
        let ((update_status, _), (delete_status, _)) = tokio::join!(
            async move {
                request(
                    &update_app,
                    "PUT",
                    &format!("/api/jobs/{id}"),
                    Some(minimal_body("Raced")),
                )
                .await
            },
            async move { request(&delete_app, "DELETE", &format!("/api/jobs/{id}"), None).await },
        );

        // Neither request may surface a storage error.
        for status in [update_status, delete_status] {
            assert!(
                status == StatusCode::OK || status == StatusCode::NOT_FOUND,
                "unexpected status {status}"
            );
        }

        // Exactly one effect is final: the row is either gone or the
        // fully replaced version.
        let (status, body) = request(&app, "GET", &format!("/api/jobs/{id}"), None).await;
        match status {
            StatusCode::NOT_FOUND => {}
            StatusCode::OK => {
                assert_eq!(body["jobTitle"], "Raced");
                assert!(body["salaryRange"].is_null());
            }
            other => panic!("unexpected status {other}"),
        }
    }
}
