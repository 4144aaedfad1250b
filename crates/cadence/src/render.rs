//! Plain-text rendering of summaries.

use chrono::{DateTime, Utc};

use cadence_jobs::{JobSummary, TriggerSummary};

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// One line per job: key, type, fire times and the flags that are set.
pub fn job_line(summary: &JobSummary) -> String {
    let flags: Vec<&str> = [
        (summary.concurrent_execution_disallowed, "no-concurrency"),
        (summary.durable, "durable"),
        (summary.persist_job_data_after_execution, "persist-data"),
        (summary.requests_recovery, "recovery"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();

    let mut line = format!(
        "{}.{}  {}  last: {}  next: {}",
        summary.group,
        summary.name,
        summary.job_type,
        timestamp(summary.last_fire_time_utc),
        timestamp(summary.next_fire_time_utc)
    );
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}

/// One line per trigger: key, kind and description.
pub fn trigger_line(summary: &TriggerSummary) -> String {
    format!(
        "{}.{}  ({})  {}  next: {}",
        summary.group,
        summary.name,
        summary.kind,
        summary.description.as_deref().unwrap_or("no description"),
        timestamp(summary.next_fire_time_utc)
    )
}
