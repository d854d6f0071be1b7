// crates/core/src/scraper/command.rs
//! Command-backed scraper — spawns an external scraper process and parses
//! its JSON output.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use super::task::PostScraper;
use crate::error::ScrapeError;
use crate::post::Post;

/// How much child stderr to keep in an error message.
const STDERR_SNIPPET_LEN: usize = 400;

/// Default deadline for one scrape run, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 900;

/// Scraper that runs a configured external command.
///
/// The command is expected to print a JSON array of posts on stdout and
/// exit zero. Anything else (a spawn failure, a non-zero exit, unparsable
/// output, an overrun deadline) becomes a [`ScrapeError`].
pub struct CommandScraper {
    command: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandScraper {
    /// Create a scraper for the given command with the default deadline.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Arguments passed to the scraper command.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Set the deadline in seconds for one scrape run.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[async_trait]
impl PostScraper for CommandScraper {
    async fn scrape(&self) -> Result<Vec<Post>, ScrapeError> {
        tracing::info!(
            command = %self.command,
            timeout_secs = self.timeout_secs,
            "spawning scraper process"
        );

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            // Null stdin so the child never blocks waiting for input;
            // kill_on_drop so the deadline also reaps the child.
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = timeout(Duration::from_secs(self.timeout_secs), cmd.output())
            .await
            .map_err(|_| ScrapeError::Timeout(self.timeout_secs))?
            .map_err(|e| ScrapeError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScrapeError::ExitFailure {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().chars().take(STDERR_SNIPPET_LEN).collect(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let posts: Vec<Post> = serde_json::from_str(stdout.trim())
            .map_err(|e| ScrapeError::MalformedOutput(e.to_string()))?;

        tracing::info!(posts = posts.len(), "scraper process finished");
        Ok(posts)
    }

    fn name(&self) -> &str {
        "command"
    }
}
