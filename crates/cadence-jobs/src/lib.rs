//! Read-only job and trigger summaries for Cadence.
//!
//! This crate provides:
//! - Job and trigger records in the shape a scheduler reports them
//! - A `SchedulerSource` seam for querying a scheduler
//! - An in-memory scheduler snapshot loadable from JSON
//! - `JobSummary` and `TriggerSummary` projections built on `cadence-schedule`

mod error;
mod snapshot;
mod source;
mod summary;
mod types;

pub use error::JobsError;
pub use snapshot::{SchedulerSnapshot, SnapshotDocument};
pub use source::SchedulerSource;
pub use summary::{
    JobSummarizer, JobSummary, TriggerSummary, most_relevant_trigger, summarize_job,
    summarize_trigger,
};
pub use types::{DEFAULT_GROUP, JobKey, JobRecord, TriggerKey, TriggerRecord};
