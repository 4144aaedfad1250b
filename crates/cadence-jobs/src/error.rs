//! Error types for job summaries.

use thiserror::Error;

use cadence_schedule::ScheduleError;

use crate::{JobKey, TriggerKey};

/// Errors that can occur while reading scheduler state or summarizing it.
#[derive(Debug, Error)]
pub enum JobsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document could not be parsed.
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A trigger's schedule could not be described.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Job already exists.
    #[error("job already exists: {0}")]
    JobExists(JobKey),

    /// Job not found.
    #[error("job not found: {0}")]
    JobNotFound(JobKey),

    /// Trigger already exists.
    #[error("trigger already exists: {0}")]
    TriggerExists(TriggerKey),

    /// The scheduler could not answer a query.
    #[error("scheduler query failed: {0}")]
    Source(String),
}
