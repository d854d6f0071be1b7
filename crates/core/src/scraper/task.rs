// crates/core/src/scraper/task.rs
//! `PostScraper` trait defining the scrape-task boundary.

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::post::Post;

/// A long-running task that collects blog posts.
///
/// Implementations own everything site-specific (session handling,
/// listing traversal, content extraction). The job worker only ever sees
/// the final post collection or a classified failure.
#[async_trait]
pub trait PostScraper: Send + Sync {
    /// Run one full scrape to completion.
    async fn scrape(&self) -> Result<Vec<Post>, ScrapeError>;

    /// Implementation name for logging (e.g. "command").
    fn name(&self) -> &str;
}
