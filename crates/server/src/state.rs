// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use blogsnap_core::PostScraper;

use crate::delivery::ResultDelivery;
use crate::jobs::JobStore;

/// How often the status event stream re-reads the job table.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// The job table. Each record is written only by its own worker.
    pub jobs: JobStore,
    /// The scrape task implementation workers run.
    pub scraper: Arc<dyn PostScraper>,
    /// Outbound result forwarding for completed jobs.
    pub delivery: Arc<ResultDelivery>,
    /// Poll interval for the status event stream (shortened in tests).
    pub poll_interval: Duration,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(scraper: Arc<dyn PostScraper>, delivery: ResultDelivery) -> Arc<Self> {
        Self::with_poll_interval(scraper, delivery, STATUS_POLL_INTERVAL)
    }

    /// Create with an explicit stream poll interval (for tests).
    pub fn with_poll_interval(
        scraper: Arc<dyn PostScraper>,
        delivery: ResultDelivery,
        poll_interval: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            jobs: JobStore::new(),
            scraper,
            delivery: Arc::new(delivery),
            poll_interval,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blogsnap_core::{Post, ScrapeError};

    struct NullScraper;

    #[async_trait]
    impl PostScraper for NullScraper {
        async fn scrape(&self) -> Result<Vec<Post>, ScrapeError> {
            Ok(vec![])
        }
        fn name(&self) -> &str {
            "null"
        }
    }

    #[tokio::test]
    async fn fresh_state_has_no_uptime_and_empty_table() {
        let state = AppState::new(Arc::new(NullScraper), ResultDelivery::new(None));
        assert!(state.uptime_secs() < 1);
        assert!(state.jobs.get("anything").is_none());
        assert_eq!(state.poll_interval, STATUS_POLL_INTERVAL);
    }
}
