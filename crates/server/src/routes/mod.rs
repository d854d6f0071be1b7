// crates/server/src/routes/mod.rs
//! API route handlers for the blogsnap server.

pub mod health;
pub mod jobs;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health — Health check
/// - POST /api/jobs — Start a scrape job
/// - GET  /api/jobs/{job_id} — Poll a job's status or result
/// - GET  /api/jobs/{job_id}/events — SSE stream of status snapshots
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", jobs::router())
        .with_state(state)
}
