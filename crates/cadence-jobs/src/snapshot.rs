//! In-memory scheduler state loaded from a JSON snapshot.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{JobKey, JobRecord, JobsError, SchedulerSource, TriggerRecord};

/// On-disk layout of a scheduler snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub triggers: Vec<TriggerRecord>,
}

/// A point-in-time copy of a scheduler's jobs and triggers.
#[derive(Debug, Clone, Default)]
pub struct SchedulerSnapshot {
    jobs: Arc<RwLock<Vec<JobRecord>>>,
    triggers: Arc<RwLock<Vec<TriggerRecord>>>,
}

impl SchedulerSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a parsed document.
    ///
    /// Fails on duplicate jobs or triggers, and on triggers whose job is missing.
    pub async fn from_document(document: SnapshotDocument) -> Result<Self, JobsError> {
        let snapshot = Self::new();
        for job in document.jobs {
            snapshot.insert_job(job).await?;
        }
        for trigger in document.triggers {
            snapshot.insert_trigger(trigger).await?;
        }
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text.
    pub async fn from_json(json: &str) -> Result<Self, JobsError> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Self::from_document(document).await
    }

    /// Load a snapshot from a JSON file.
    #[tracing::instrument]
    pub async fn load_from_path(path: &Path) -> Result<Self, JobsError> {
        let json = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&json).await?;

        info!(
            jobs = snapshot.jobs.read().await.len(),
            triggers = snapshot.triggers.read().await.len(),
            "loaded scheduler snapshot"
        );
        Ok(snapshot)
    }

    /// Add a job.
    pub async fn insert_job(&self, job: JobRecord) -> Result<(), JobsError> {
        let key = job.key();
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|j| j.key() == key) {
            return Err(JobsError::JobExists(key));
        }

        debug!(job = %key, "added job");
        jobs.push(job);
        Ok(())
    }

    /// Add a trigger. Its job must already be present.
    pub async fn insert_trigger(&self, trigger: TriggerRecord) -> Result<(), JobsError> {
        let job_key = trigger.job_key();
        if !self.jobs.read().await.iter().any(|j| j.key() == job_key) {
            return Err(JobsError::JobNotFound(job_key));
        }

        let key = trigger.key();
        let mut triggers = self.triggers.write().await;
        if triggers.iter().any(|t| t.key() == key) {
            return Err(JobsError::TriggerExists(key));
        }

        debug!(trigger = %key, job = %job_key, "added trigger");
        triggers.push(trigger);
        Ok(())
    }
}

#[async_trait]
impl SchedulerSource for SchedulerSnapshot {
    async fn job_keys(&self) -> Result<Vec<JobKey>, JobsError> {
        Ok(self.jobs.read().await.iter().map(JobRecord::key).collect())
    }

    async fn job(&self, key: &JobKey) -> Result<Option<JobRecord>, JobsError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .find(|j| &j.key() == key)
            .cloned())
    }

    async fn triggers_of_job(&self, key: &JobKey) -> Result<Vec<TriggerRecord>, JobsError> {
        Ok(self
            .triggers
            .read()
            .await
            .iter()
            .filter(|t| &t.job_key() == key)
            .cloned()
            .collect())
    }
}
