// crates/server/src/jobs/store.rs
//! In-memory job table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use blogsnap_core::Post;
use uuid::Uuid;

use super::types::{JobId, JobRecord, JobStatus};

/// Shared, process-lifetime table of scrape jobs.
///
/// Cloning is cheap (a handle to the same table). Each record has exactly
/// one writer (the worker spawned for it) and any number of readers; reads
/// return whole-record clones, so a reader may observe a slightly stale
/// snapshot but never a torn one. Records are never evicted.
///
/// The typed mutators enforce the job state machine: terminal records are
/// never mutated, and progress never regresses while non-terminal.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh job id and insert a `Pending` record for it.
    pub fn create(&self) -> JobId {
        let id = Uuid::new_v4().to_string();
        match self.jobs.write() {
            Ok(mut jobs) => {
                jobs.insert(id.clone(), JobRecord::new(id.clone()));
            }
            Err(e) => tracing::error!("RwLock poisoned inserting job record: {e}"),
        }
        id
    }

    /// Snapshot of the full record, or `None` for an unknown id.
    pub fn get(&self, id: &str) -> Option<JobRecord> {
        match self.jobs.read() {
            Ok(jobs) => jobs.get(id).cloned(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading job record: {e}");
                None
            }
        }
    }

    /// Transition the job to `Running`.
    pub fn set_running(&self, id: &str) {
        self.update(id, |job| {
            job.status = JobStatus::Running;
        });
    }

    /// Record a progress milestone. Regressions are clamped so observed
    /// progress is monotonically non-decreasing.
    pub fn set_progress(&self, id: &str, message: impl Into<String>, progress: i32) {
        let message = message.into();
        self.update(id, |job| {
            job.message = message;
            job.progress = job.progress.max(progress);
        });
    }

    /// Transition the job to `Completed` and attach its result. This is
    /// the only path that populates `result`.
    pub fn complete(&self, id: &str, message: impl Into<String>, posts: Vec<Post>) {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Completed;
            job.message = message;
            job.progress = 100;
            job.result = Some(posts);
        });
    }

    /// Transition the job to `Error` with a failure summary.
    pub fn fail(&self, id: &str, message: impl Into<String>) {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Error;
            job.message = message;
            job.progress = -1;
            job.result = None;
        });
    }

    fn update<F: FnOnce(&mut JobRecord)>(&self, id: &str, f: F) {
        match self.jobs.write() {
            Ok(mut jobs) => match jobs.get_mut(id) {
                Some(job) if job.status.is_terminal() => {
                    tracing::warn!(
                        job_id = %id,
                        status = job.status.as_str(),
                        "ignoring update to terminal job"
                    );
                }
                Some(job) => f(job),
                None => tracing::warn!(job_id = %id, "ignoring update to unknown job"),
            },
            Err(e) => tracing::error!("RwLock poisoned updating job record: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(log_no: &str) -> Post {
        Post {
            log_no: log_no.to_string(),
            title: "t".to_string(),
            url: format!("https://blog.example.com/daisy/{log_no}"),
            date: None,
            content: "c".to_string(),
        }
    }

    #[test]
    fn create_inserts_pending_record() {
        let store = JobStore::new();
        let id = store.create();
        let record = store.get(&id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.status, JobStatus::Pending);
        assert_eq!(record.progress, 0);
        assert!(record.result.is_none());
    }

    #[test]
    fn get_unknown_returns_none() {
        let store = JobStore::new();
        assert!(store.get("no-such-job").is_none());
    }

    #[test]
    fn ids_are_unique_and_records_independent() {
        let store = JobStore::new();
        let a = store.create();
        let b = store.create();
        assert_ne!(a, b);

        store.set_running(&a);
        store.set_progress(&a, "collecting posts", 10);

        assert_eq!(store.get(&a).unwrap().status, JobStatus::Running);
        assert_eq!(store.get(&b).unwrap().status, JobStatus::Pending);
        assert_eq!(store.get(&b).unwrap().progress, 0);
    }

    #[test]
    fn full_lifecycle_to_completed() {
        let store = JobStore::new();
        let id = store.create();

        store.set_running(&id);
        assert_eq!(store.get(&id).unwrap().status, JobStatus::Running);
        assert!(store.get(&id).unwrap().result.is_none());

        store.set_progress(&id, "collecting posts", 10);
        let record = store.get(&id).unwrap();
        assert_eq!(record.message, "collecting posts");
        assert_eq!(record.progress, 10);

        store.complete(&id, "scrape complete (2 posts collected)", vec![post("1"), post("2")]);
        let record = store.get(&id).unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.result.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn failure_clears_result_and_marks_progress() {
        let store = JobStore::new();
        let id = store.create();
        store.set_running(&id);
        store.fail(&id, "Scraper exited with status 3: login wall");

        let record = store.get(&id).unwrap();
        assert_eq!(record.status, JobStatus::Error);
        assert_eq!(record.progress, -1);
        assert!(record.result.is_none());
        assert!(!record.message.is_empty());
    }

    #[test]
    fn terminal_records_are_immutable() {
        let store = JobStore::new();
        let id = store.create();
        store.set_running(&id);
        store.complete(&id, "done", vec![post("1")]);

        // None of these may take effect once the job is terminal.
        store.fail(&id, "late failure");
        store.set_progress(&id, "late progress", 5);
        store.set_running(&id);

        let record = store.get(&id).unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.result.as_ref().unwrap().len(), 1);

        let failed = store.create();
        store.set_running(&failed);
        store.fail(&failed, "boom");
        store.complete(&failed, "too late", vec![post("2")]);
        let record = store.get(&failed).unwrap();
        assert_eq!(record.status, JobStatus::Error);
        assert!(record.result.is_none());
    }

    #[test]
    fn progress_never_regresses() {
        let store = JobStore::new();
        let id = store.create();
        store.set_running(&id);

        store.set_progress(&id, "halfway", 50);
        store.set_progress(&id, "stale update", 10);

        let record = store.get(&id).unwrap();
        assert_eq!(record.progress, 50);
        // The message still moves — only the counter is clamped.
        assert_eq!(record.message, "stale update");
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let store = JobStore::new();
        let id = store.create();
        store.set_running(&id);

        let writer = {
            let store = store.clone();
            let id = id.clone();
            std::thread::spawn(move || {
                for step in 10..=99 {
                    store.set_progress(&id, format!("step {step}"), step);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        if let Some(record) = store.get(&id) {
                            // A snapshot is internally consistent: any
                            // non-terminal read is a full record clone.
                            assert!(record.progress >= 0);
                            assert!(record.result.is_none());
                        }
                    }
                })
            })
            .collect();

        writer.join().expect("writer panicked");
        for reader in readers {
            reader.join().expect("reader panicked");
        }
        assert_eq!(store.get(&id).unwrap().progress, 99);
    }
}
