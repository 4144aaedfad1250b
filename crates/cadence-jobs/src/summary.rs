//! Read-only job and trigger summaries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cadence_schedule::{CronTranslator, EnglishCron, Schedule, TriggerKind};

use crate::{JobKey, JobRecord, JobsError, SchedulerSource, TriggerRecord};

/// A job's identity, policy flags and fire times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub name: String,
    pub group: String,
    pub description: Option<String>,
    pub job_type: String,
    pub concurrent_execution_disallowed: bool,
    pub durable: bool,
    pub persist_job_data_after_execution: bool,
    pub requests_recovery: bool,
    pub last_fire_time_utc: Option<DateTime<Utc>>,
    pub next_fire_time_utc: Option<DateTime<Utc>>,
}

/// A trigger's kind and schedule description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSummary {
    pub name: String,
    pub group: String,
    pub kind: TriggerKind,
    /// `None` when the trigger matches no known shape.
    pub description: Option<String>,
    pub previous_fire_time_utc: Option<DateTime<Utc>>,
    pub next_fire_time_utc: Option<DateTime<Utc>>,
}

/// The trigger whose fire times best represent the job.
///
/// Earliest upcoming fire wins. Without any upcoming fire, the most recent
/// past fire wins. Otherwise the first trigger.
pub fn most_relevant_trigger(triggers: &[TriggerRecord]) -> Option<&TriggerRecord> {
    triggers
        .iter()
        .filter(|t| t.next_fire_time.is_some())
        .min_by_key(|t| t.next_fire_time)
        .or_else(|| {
            triggers
                .iter()
                .filter(|t| t.previous_fire_time.is_some())
                .max_by_key(|t| t.previous_fire_time)
        })
        .or_else(|| triggers.first())
}

/// Project a job and its triggers into a summary.
pub fn summarize_job(job: &JobRecord, triggers: &[TriggerRecord]) -> JobSummary {
    let relevant = most_relevant_trigger(triggers);

    JobSummary {
        name: job.name.clone(),
        group: job.group.clone(),
        description: job.description.clone(),
        job_type: job.job_type.clone(),
        concurrent_execution_disallowed: job.concurrent_execution_disallowed,
        durable: job.durable,
        persist_job_data_after_execution: job.persist_job_data_after_execution,
        requests_recovery: job.requests_recovery,
        last_fire_time_utc: relevant.and_then(|t| t.previous_fire_time),
        next_fire_time_utc: relevant.and_then(|t| t.next_fire_time),
    }
}

/// Classify and describe a single trigger.
pub fn summarize_trigger(
    trigger: &TriggerRecord,
    cron: &dyn CronTranslator,
) -> Result<TriggerSummary, JobsError> {
    let (kind, description) = match Schedule::resolve(trigger) {
        Some(schedule) => (schedule.kind(), Some(schedule.describe(cron)?)),
        None => {
            debug!(trigger = %trigger.key(), "trigger matches no known schedule shape");
            (TriggerKind::Unknown, None)
        }
    };

    Ok(TriggerSummary {
        name: trigger.name.clone(),
        group: trigger.group.clone(),
        kind,
        description,
        previous_fire_time_utc: trigger.previous_fire_time,
        next_fire_time_utc: trigger.next_fire_time,
    })
}

/// Builds summaries from a scheduler, querying it once per request.
pub struct JobSummarizer<S> {
    source: S,
    cron: Arc<dyn CronTranslator>,
}

impl<S: SchedulerSource> JobSummarizer<S> {
    /// Create a summarizer that renders cron triggers in English.
    pub fn new(source: S) -> Self {
        Self::with_translator(source, Arc::new(EnglishCron))
    }

    /// Create a summarizer with a custom cron translator.
    pub fn with_translator(source: S, cron: Arc<dyn CronTranslator>) -> Self {
        Self { source, cron }
    }

    /// Summaries of every job, ordered by group then name.
    #[tracing::instrument(skip(self))]
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>, JobsError> {
        let keys = self.source.job_keys().await?;

        let mut summaries = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(job) = self.source.job(&key).await? else {
                warn!(job = %key, "job disappeared while listing");
                continue;
            };
            let triggers = self.source.triggers_of_job(&key).await?;
            summaries.push(summarize_job(&job, &triggers));
        }

        summaries.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        debug!(count = summaries.len(), "assembled job summaries");
        Ok(summaries)
    }

    /// Summary of one job.
    #[tracing::instrument(skip(self), fields(job = %key))]
    pub async fn job(&self, key: &JobKey) -> Result<JobSummary, JobsError> {
        let job = self
            .source
            .job(key)
            .await?
            .ok_or_else(|| JobsError::JobNotFound(key.clone()))?;
        let triggers = self.source.triggers_of_job(key).await?;
        Ok(summarize_job(&job, &triggers))
    }

    /// Kind and description of every trigger attached to a job.
    #[tracing::instrument(skip(self), fields(job = %key))]
    pub async fn triggers_of_job(&self, key: &JobKey) -> Result<Vec<TriggerSummary>, JobsError> {
        if self.source.job(key).await?.is_none() {
            return Err(JobsError::JobNotFound(key.clone()));
        }

        self.source
            .triggers_of_job(key)
            .await?
            .iter()
            .map(|trigger| summarize_trigger(trigger, self.cron.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchedulerSnapshot, TriggerKey};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    fn job() -> JobRecord {
        JobRecord {
            name: "rebuild-index".to_string(),
            group: "search".to_string(),
            description: Some("Rebuilds the search index".to_string()),
            job_type: "search::RebuildIndex".to_string(),
            concurrent_execution_disallowed: true,
            durable: false,
            persist_job_data_after_execution: true,
            requests_recovery: false,
        }
    }

    fn trigger(
        name: &str,
        previous: Option<DateTime<Utc>>,
        next: Option<DateTime<Utc>>,
    ) -> TriggerRecord {
        let mut trigger = TriggerRecord::new(TriggerKey::new("search", name), &job().key());
        trigger.previous_fire_time = previous;
        trigger.next_fire_time = next;
        trigger
    }

    #[test]
    fn flags_copied_verbatim() {
        let summary = summarize_job(&job(), &[]);
        assert_eq!(summary.name, "rebuild-index");
        assert_eq!(summary.group, "search");
        assert_eq!(summary.description.as_deref(), Some("Rebuilds the search index"));
        assert_eq!(summary.job_type, "search::RebuildIndex");
        assert!(summary.concurrent_execution_disallowed);
        assert!(!summary.durable);
        assert!(summary.persist_job_data_after_execution);
        assert!(!summary.requests_recovery);
    }

    #[test]
    fn no_triggers_means_no_fire_times() {
        let summary = summarize_job(&job(), &[]);
        assert_eq!(summary.last_fire_time_utc, None);
        assert_eq!(summary.next_fire_time_utc, None);
    }

    #[test]
    fn earliest_next_fire_wins() {
        let triggers = [
            trigger("late", Some(at(9)), Some(at(20))),
            trigger("soon", Some(at(6)), Some(at(12))),
            trigger("done", Some(at(11)), None),
        ];
        let summary = summarize_job(&job(), &triggers);
        assert_eq!(summary.next_fire_time_utc, Some(at(12)));
        assert_eq!(summary.last_fire_time_utc, Some(at(6)));
    }

    #[test]
    fn latest_previous_fire_when_nothing_upcoming() {
        let triggers = [
            trigger("old", Some(at(3)), None),
            trigger("recent", Some(at(10)), None),
        ];
        let relevant = most_relevant_trigger(&triggers).unwrap();
        assert_eq!(relevant.name, "recent");
    }

    #[test]
    fn never_fired_trigger_falls_back_to_first() {
        let triggers = [trigger("first", None, None), trigger("second", None, None)];
        assert_eq!(most_relevant_trigger(&triggers).unwrap().name, "first");

        let summary = summarize_job(&job(), &triggers);
        assert_eq!(summary.last_fire_time_utc, None);
        assert_eq!(summary.next_fire_time_utc, None);
    }

    #[test]
    fn trigger_summary_for_simple_trigger() {
        let mut record = trigger("every-90s", None, Some(at(8)));
        record.repeat_interval_ms = Some(Duration::seconds(90).num_milliseconds());
        record.repeat_count = Some(3);

        let summary = summarize_trigger(&record, &EnglishCron).unwrap();
        assert_eq!(summary.kind, TriggerKind::Simple);
        assert_eq!(
            summary.description.as_deref(),
            Some("Repeat 3 times every 1 minute, 30 seconds")
        );
        assert_eq!(summary.next_fire_time_utc, Some(at(8)));
    }

    #[test]
    fn trigger_summary_for_unknown_trigger() {
        let summary = summarize_trigger(&trigger("blank", None, None), &EnglishCron).unwrap();
        assert_eq!(summary.kind, TriggerKind::Unknown);
        assert_eq!(summary.description, None);
    }

    #[test]
    fn bad_cron_propagates() {
        let mut record = trigger("broken", None, None);
        record.cron_expression = Some("every tuesday".to_string());

        let err = summarize_trigger(&record, &EnglishCron).unwrap_err();
        assert!(matches!(err, JobsError::Schedule(_)));
    }

    #[test]
    fn quartz_month_end_trigger_is_described() {
        let mut record = trigger("month-end", None, Some(at(18)));
        record.cron_expression = Some("0 0 18 L * ?".to_string());

        let summary = summarize_trigger(&record, &EnglishCron).unwrap();
        assert_eq!(summary.kind, TriggerKind::Cron);
        assert_eq!(
            summary.description.as_deref(),
            Some("At 18:00, on the last day of the month")
        );
    }

    /// A scheduler whose every query fails.
    struct Unreachable;

    #[async_trait]
    impl SchedulerSource for Unreachable {
        async fn job_keys(&self) -> Result<Vec<JobKey>, JobsError> {
            Err(JobsError::Source("connection refused".to_string()))
        }

        async fn job(&self, _key: &JobKey) -> Result<Option<JobRecord>, JobsError> {
            Err(JobsError::Source("connection refused".to_string()))
        }

        async fn triggers_of_job(&self, _key: &JobKey) -> Result<Vec<TriggerRecord>, JobsError> {
            Err(JobsError::Source("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn scheduler_failures_propagate() {
        let summarizer = JobSummarizer::new(Unreachable);
        let key = JobKey::new("search", "rebuild-index");

        let err = summarizer.list_jobs().await.unwrap_err();
        assert_eq!(err.to_string(), "scheduler query failed: connection refused");

        assert!(matches!(
            summarizer.job(&key).await,
            Err(JobsError::Source(_))
        ));
        assert!(matches!(
            summarizer.triggers_of_job(&key).await,
            Err(JobsError::Source(_))
        ));
    }

    #[tokio::test]
    async fn one_quartz_trigger_does_not_break_the_listing() {
        let snapshot = SchedulerSnapshot::new();
        let job = job();
        let key = job.key();
        snapshot.insert_job(job).await.unwrap();

        let mut nth_friday = TriggerRecord::new(TriggerKey::new("search", "third-friday"), &key);
        nth_friday.cron_expression = Some("0 0 12 ? * 6#3".to_string());
        snapshot.insert_trigger(nth_friday).await.unwrap();

        let mut hourly = TriggerRecord::new(TriggerKey::new("search", "hourly"), &key);
        hourly.repeat_interval_ms = Some(3_600_000);
        snapshot.insert_trigger(hourly).await.unwrap();

        let described: Vec<Option<String>> = JobSummarizer::new(snapshot)
            .triggers_of_job(&key)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(
            described,
            vec![
                Some("At 12:00, on the third Friday of the month".to_string()),
                Some("Repeat every 1 hour".to_string()),
            ]
        );
    }
}
