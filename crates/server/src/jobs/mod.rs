// crates/server/src/jobs/mod.rs
//! Background scrape-job system.
//!
//! Provides:
//! - `JobStore` — in-memory job table, one writer per record
//! - `worker` — per-job execution that drives a record to a terminal state
//! - job and status-snapshot types shared with the API layer

pub mod store;
pub mod types;
pub mod worker;

pub use store::JobStore;
pub use types::{JobId, JobRecord, JobStatus, StatusSnapshot};
