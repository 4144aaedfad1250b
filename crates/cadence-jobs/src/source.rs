//! The seam to the external scheduler.

use async_trait::async_trait;

use crate::{JobKey, JobRecord, JobsError, TriggerRecord};

/// Read access to a scheduler's jobs and triggers.
///
/// Each call is a single query; callers do not retry.
#[async_trait]
pub trait SchedulerSource: Send + Sync {
    /// Keys of every job the scheduler knows about.
    async fn job_keys(&self) -> Result<Vec<JobKey>, JobsError>;

    /// A job's record, or `None` if it does not exist.
    async fn job(&self, key: &JobKey) -> Result<Option<JobRecord>, JobsError>;

    /// Triggers attached to a job, in the order the scheduler stores them.
    async fn triggers_of_job(&self, key: &JobKey) -> Result<Vec<TriggerRecord>, JobsError>;
}
