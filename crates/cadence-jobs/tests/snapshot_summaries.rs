//! Integration tests: summaries assembled from a snapshot file on disk.

use std::io::Write;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use cadence_jobs::{JobKey, JobSummarizer, JobsError, SchedulerSnapshot};
use cadence_schedule::TriggerKind;

const SNAPSHOT: &str = r#"{
  "jobs": [
    {
      "name": "send-digest",
      "group": "mail",
      "description": "Daily digest email",
      "job_type": "mail::SendDigest",
      "concurrent_execution_disallowed": true,
      "durable": true
    },
    {
      "name": "archive",
      "job_type": "storage::Archive",
      "requests_recovery": true
    },
    {
      "name": "poll-inbox",
      "group": "mail",
      "job_type": "mail::PollInbox",
      "persist_job_data_after_execution": true
    }
  ],
  "triggers": [
    {
      "name": "digest-cron",
      "group": "mail",
      "job_name": "send-digest",
      "job_group": "mail",
      "cron_expression": "0 0 7 ? * MON-FRI",
      "previous_fire_time": "2026-03-02T07:00:00Z",
      "next_fire_time": "2026-03-03T07:00:00Z"
    },
    {
      "name": "office-hours",
      "group": "mail",
      "job_name": "poll-inbox",
      "job_group": "mail",
      "repeat_interval": 1,
      "repeat_interval_unit": "hour",
      "start_time_of_day": "08:00:00",
      "end_time_of_day": "17:00:00",
      "days_of_week": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
      "next_fire_time": "2026-03-02T09:00:00Z"
    },
    {
      "name": "weekly",
      "group": "mail",
      "job_name": "poll-inbox",
      "job_group": "mail",
      "repeat_interval": 2,
      "repeat_interval_unit": "week",
      "next_fire_time": "2026-03-09T00:00:00Z"
    }
  ]
}"#;

async fn summarizer() -> JobSummarizer<SchedulerSnapshot> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();

    let snapshot = SchedulerSnapshot::load_from_path(file.path()).await.unwrap();
    JobSummarizer::new(snapshot)
}

#[tokio::test]
async fn lists_jobs_sorted_by_group_and_name() {
    let summaries = summarizer().await.list_jobs().await.unwrap();

    let keys: Vec<(String, String)> = summaries
        .iter()
        .map(|s| (s.group.clone(), s.name.clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("DEFAULT".to_string(), "archive".to_string()),
            ("mail".to_string(), "poll-inbox".to_string()),
            ("mail".to_string(), "send-digest".to_string()),
        ]
    );

    let archive = &summaries[0];
    assert!(archive.requests_recovery);
    assert!(!archive.durable);
    assert_eq!(archive.last_fire_time_utc, None);
    assert_eq!(archive.next_fire_time_utc, None);
}

#[tokio::test]
async fn job_summary_uses_trigger_fire_times() {
    let summary = summarizer()
        .await
        .job(&JobKey::new("mail", "send-digest"))
        .await
        .unwrap();

    assert!(summary.concurrent_execution_disallowed);
    assert!(summary.durable);
    assert_eq!(summary.description.as_deref(), Some("Daily digest email"));
    assert_eq!(
        summary.last_fire_time_utc,
        Some(Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap())
    );
    assert_eq!(
        summary.next_fire_time_utc,
        Some(Utc.with_ymd_and_hms(2026, 3, 3, 7, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn earliest_trigger_represents_job_with_several() {
    let summary = summarizer()
        .await
        .job(&JobKey::new("mail", "poll-inbox"))
        .await
        .unwrap();

    assert_eq!(
        summary.next_fire_time_utc,
        Some(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn trigger_summaries_describe_each_kind() {
    let summarizer = summarizer().await;

    let digest = summarizer
        .triggers_of_job(&JobKey::new("mail", "send-digest"))
        .await
        .unwrap();
    assert_eq!(digest.len(), 1);
    assert_eq!(digest[0].kind, TriggerKind::Cron);
    assert_eq!(
        digest[0].description.as_deref(),
        Some("At 07:00, Monday through Friday")
    );

    let inbox = summarizer
        .triggers_of_job(&JobKey::new("mail", "poll-inbox"))
        .await
        .unwrap();
    let described: Vec<(TriggerKind, Option<String>)> = inbox
        .into_iter()
        .map(|t| (t.kind, t.description))
        .collect();
    assert_eq!(
        described,
        vec![
            (
                TriggerKind::Daily,
                Some("Repeat every hour from 8:00 to 17:00 only on Weekdays".to_string())
            ),
            (
                TriggerKind::Calendar,
                Some("Repeat every 2 weeks".to_string())
            ),
        ]
    );
}

#[tokio::test]
async fn missing_job_is_an_error() {
    let summarizer = summarizer().await;
    let key = JobKey::new("mail", "nope");

    let err = summarizer.job(&key).await.unwrap_err();
    assert!(matches!(err, JobsError::JobNotFound(ref k) if k == &key));

    let err = summarizer.triggers_of_job(&key).await.unwrap_err();
    assert!(matches!(err, JobsError::JobNotFound(_)));
}

#[tokio::test]
async fn summaries_serialize_with_snake_case_fields() {
    let summary = summarizer()
        .await
        .job(&JobKey::new("DEFAULT", "archive"))
        .await
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["job_type"], "storage::Archive");
    assert_eq!(json["requests_recovery"], true);
    assert!(json["next_fire_time_utc"].is_null());
}

#[tokio::test]
async fn orphan_trigger_rejects_snapshot() {
    let json = r#"{
      "jobs": [],
      "triggers": [{ "name": "t", "job_name": "ghost", "repeat_interval_ms": 1000 }]
    }"#;

    let err = SchedulerSnapshot::from_json(json).await.unwrap_err();
    assert!(matches!(err, JobsError::JobNotFound(_)));
}
