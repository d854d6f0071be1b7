// crates/core/src/error.rs
//! Error taxonomy for the scrape-task boundary.

use thiserror::Error;

/// Errors a scrape task can end with.
///
/// Every failure mode of the external scraper maps onto one of these
/// variants so the job worker can record a classified terminal state.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to spawn scraper process: {0}")]
    SpawnFailed(String),

    #[error("Scraper exited with status {code}: {stderr}")]
    ExitFailure { code: i32, stderr: String },

    #[error("Scraper produced malformed output: {0}")]
    MalformedOutput(String),

    #[error("Scraper timed out after {0} seconds")]
    Timeout(u64),
}
