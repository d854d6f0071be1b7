// crates/server/src/jobs/types.rs
//! Types for the scrape job table.

use blogsnap_core::Post;
use serde::Serialize;

/// Unique identifier for a job (UUIDv4, assigned at creation, never reused).
pub type JobId = String;

/// Lifecycle state of a scrape job.
///
/// Transitions are forward-only: `Pending → Running → {Completed | Error}`.
/// `Completed` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Error,
}

impl JobStatus {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

/// One tracked job. Written only by its own worker; read by status queries.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: JobId,
    pub status: JobStatus,
    /// Human-readable milestone text, mutated freely while non-terminal.
    pub message: String,
    /// 0–100, or -1 once the job has failed. Never decreases while the
    /// job is non-terminal.
    pub progress: i32,
    /// Scraped posts; populated exactly once, on the `Completed` transition.
    pub result: Option<Vec<Post>>,
}

impl JobRecord {
    pub(crate) fn new(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
            message: "waiting to start".to_string(),
            progress: 0,
            result: None,
        }
    }

    /// Result-free view of the observable status fields, for streaming.
    pub fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.status,
            message: self.message.clone(),
            progress: self.progress,
        }
    }
}

/// Status fields emitted on the event stream. The result payload is
/// deliberately excluded — stream consumers fetch it once via the poll
/// endpoint after the terminal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: JobStatus,
    pub message: String,
    pub progress: i32,
}
