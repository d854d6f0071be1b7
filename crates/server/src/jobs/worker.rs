// crates/server/src/jobs/worker.rs
//! Per-job worker execution.
//!
//! One worker task is spawned per job at creation. It drives the record
//! through its milestones, runs the opaque scrape task, and classifies
//! every outcome (including a panic) into a terminal state, so a job can
//! never be left stuck in `Running`.

use std::sync::Arc;

use blogsnap_core::PostScraper;

use super::store::JobStore;
use super::types::JobId;
use crate::delivery::ResultDelivery;

/// Longest failure summary recorded on a job.
const MAX_FAILURE_MESSAGE_LEN: usize = 200;

/// Spawn the worker for a freshly created job.
///
/// The API layer ignores the returned handle (fire-and-forget); tests
/// await it to observe completion deterministically.
pub fn spawn(
    store: JobStore,
    id: JobId,
    scraper: Arc<dyn PostScraper>,
    delivery: Arc<ResultDelivery>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(store, id, scraper, delivery))
}

/// Drive one job from `Running` to a terminal state.
async fn run(store: JobStore, id: JobId, scraper: Arc<dyn PostScraper>, delivery: Arc<ResultDelivery>) {
    tracing::info!(job_id = %id, scraper = scraper.name(), "scrape job starting");
    store.set_running(&id);
    store.set_progress(&id, "initializing scrape", 5);

    // The task runs in its own spawned task: a panicking scraper surfaces
    // here as a JoinError instead of killing the worker with the record
    // still marked running.
    store.set_progress(&id, "collecting posts", 10);
    let task = Arc::clone(&scraper);
    let outcome = tokio::spawn(async move { task.scrape().await }).await;

    match outcome {
        Ok(Ok(posts)) => {
            let count = posts.len();
            store.complete(
                &id,
                format!("scrape complete ({count} posts collected)"),
                posts.clone(),
            );
            tracing::info!(job_id = %id, posts = count, "scrape job completed");
            delivery.deliver(&id, &posts).await;
        }
        Ok(Err(e)) => {
            tracing::error!(job_id = %id, error = %e, "scrape job failed");
            store.fail(&id, truncate(&format!("scrape failed: {e}")));
        }
        Err(e) => {
            tracing::error!(job_id = %id, error = %e, "scrape task aborted");
            store.fail(&id, truncate(&format!("scrape task aborted: {e}")));
        }
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_FAILURE_MESSAGE_LEN).collect()
}
