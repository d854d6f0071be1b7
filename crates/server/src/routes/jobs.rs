// crates/server/src/routes/jobs.rs
//! Scrape job API routes.
//!
//! - POST /jobs                 — Start a scrape job
//! - GET  /jobs/{job_id}        — Poll a job's status or result
//! - GET  /jobs/{job_id}/events — SSE stream of status snapshots

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use blogsnap_core::Post;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::jobs::{worker, JobStatus, StatusSnapshot};
use crate::state::AppState;

/// Response for POST /api/jobs (202 Accepted).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobResponse {
    pub job_id: String,
}

/// Poll response while a job is still in flight.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
    pub progress: i32,
}

/// Poll response for a completed job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResultResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub result: Vec<Post>,
}

/// Poll response for a failed job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFailureResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
}

/// POST /api/jobs — Start a new scrape job.
///
/// Always succeeds: the record is created, the worker is spawned
/// fire-and-forget, and the id is returned immediately. Every call starts
/// an independent job; there is no single-flight policy.
async fn start_job(State(state): State<Arc<AppState>>) -> (StatusCode, Json<StartJobResponse>) {
    let job_id = state.jobs.create();
    tracing::info!(job_id = %job_id, "scrape job accepted");

    worker::spawn(
        state.jobs.clone(),
        job_id.clone(),
        Arc::clone(&state.scraper),
        Arc::clone(&state.delivery),
    );

    (StatusCode::ACCEPTED, Json(StartJobResponse { job_id }))
}

/// GET /api/jobs/{job_id} — Poll a job once.
///
/// Non-terminal jobs report their status fields; a completed job carries
/// the full result payload; a failed job maps to a 500 with its failure
/// summary; an unknown id is a 404.
async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    let record = state
        .jobs
        .get(&job_id)
        .ok_or_else(|| ApiError::JobNotFound(job_id.clone()))?;

    let response = match record.status {
        JobStatus::Completed => (
            StatusCode::OK,
            Json(JobResultResponse {
                job_id: record.id,
                status: record.status,
                result: record.result.unwrap_or_default(),
            }),
        )
            .into_response(),
        JobStatus::Error => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JobFailureResponse {
                job_id: record.id,
                status: record.status,
                message: record.message,
            }),
        )
            .into_response(),
        JobStatus::Pending | JobStatus::Running => (
            StatusCode::OK,
            Json(JobStatusResponse {
                job_id: record.id,
                status: record.status,
                message: record.message,
                progress: record.progress,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

/// GET /api/jobs/{job_id}/events — SSE stream of status snapshots.
///
/// Polls the job table at a fixed interval and emits a `status` event
/// whenever the observable fields changed since the last emission (the
/// result payload is never included). The stream closes after a terminal
/// snapshot; an unknown id yields exactly one `error` event, then closes.
async fn job_events(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let jobs = state.jobs.clone();
    let interval = state.poll_interval;

    let stream = async_stream::stream! {
        let mut last: Option<StatusSnapshot> = None;

        loop {
            let Some(record) = jobs.get(&job_id) else {
                tracing::warn!(job_id = %job_id, "status stream requested for unknown job");
                let data = serde_json::json!({
                    "status": "error",
                    "message": format!("unknown job id: {job_id}"),
                    "progress": -1,
                });
                yield Ok(Event::default().event("error").data(data.to_string()));
                break;
            };

            let snapshot = record.status_snapshot();
            let terminal = snapshot.status.is_terminal();

            if last.as_ref() != Some(&snapshot) {
                match serde_json::to_string(&snapshot) {
                    Ok(json) => yield Ok(Event::default().event("status").data(json)),
                    Err(e) => tracing::error!(error = %e, "Failed to serialize status snapshot"),
                }
                last = Some(snapshot);
            }

            if terminal {
                break;
            }

            tokio::time::sleep(interval).await;
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Build the jobs router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", post(start_job))
        .route("/jobs/{job_id}", get(get_job))
        .route("/jobs/{job_id}/events", get(job_events))
}
