//! Job and trigger records as reported by the scheduler.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use cadence_schedule::{
    CalendarSchedule, CronSchedule, DailySchedule, DayOfWeekSet, IntervalUnit, SimpleSchedule,
    TimeOfDay, TriggerShape,
};

/// Group used when a record does not name one.
pub const DEFAULT_GROUP: &str = "DEFAULT";

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

/// Rejects millisecond counts that do not fit a `chrono::Duration`.
fn interval_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = Option::<i64>::deserialize(deserializer)?;
    match millis {
        Some(ms) if Duration::try_milliseconds(ms).is_none() => Err(de::Error::custom(format!(
            "repeat_interval_ms out of range: {ms}"
        ))),
        _ => Ok(millis),
    }
}

/// Identity of a job: name within a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    #[serde(default = "default_group")]
    pub group: String,
    pub name: String,
}

/// Identity of a trigger: name within a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerKey {
    #[serde(default = "default_group")]
    pub group: String,
    pub name: String,
}

impl JobKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl TriggerKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

/// A job definition and its execution-policy flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Identifier of the code that runs the job.
    pub job_type: String,
    /// Only one instance of this job definition may run at a time.
    #[serde(default)]
    pub concurrent_execution_disallowed: bool,
    /// Kept by the scheduler even without any trigger.
    #[serde(default)]
    pub durable: bool,
    /// Job data is written back after each successful run.
    #[serde(default)]
    pub persist_job_data_after_execution: bool,
    /// Re-executed after a hard shutdown interrupted it.
    #[serde(default)]
    pub requests_recovery: bool,
}

impl JobRecord {
    pub fn key(&self) -> JobKey {
        JobKey::new(&self.group, &self.name)
    }
}

/// A trigger as stored by the scheduler.
///
/// Schedule fields are optional and a record may fill in the fields of more
/// than one shape; [`TriggerShape`] exposes every shape the record satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub name: String,
    #[serde(default = "default_group")]
    pub group: String,
    pub job_name: String,
    #[serde(default = "default_group")]
    pub job_group: String,
    #[serde(default)]
    pub description: Option<String>,

    pub cron_expression: Option<String>,
    #[serde(default, deserialize_with = "interval_millis")]
    pub repeat_interval_ms: Option<i64>,
    pub repeat_count: Option<i32>,
    pub repeat_interval: Option<i32>,
    pub repeat_interval_unit: Option<IntervalUnit>,
    pub start_time_of_day: Option<TimeOfDay>,
    pub end_time_of_day: Option<TimeOfDay>,
    pub days_of_week: Option<DayOfWeekSet>,

    pub previous_fire_time: Option<DateTime<Utc>>,
    pub next_fire_time: Option<DateTime<Utc>>,
}

impl TriggerRecord {
    /// A record with identity only and no schedule fields.
    pub fn new(key: TriggerKey, job: &JobKey) -> Self {
        Self {
            name: key.name,
            group: key.group,
            job_name: job.name.clone(),
            job_group: job.group.clone(),
            description: None,
            cron_expression: None,
            repeat_interval_ms: None,
            repeat_count: None,
            repeat_interval: None,
            repeat_interval_unit: None,
            start_time_of_day: None,
            end_time_of_day: None,
            days_of_week: None,
            previous_fire_time: None,
            next_fire_time: None,
        }
    }

    pub fn key(&self) -> TriggerKey {
        TriggerKey::new(&self.group, &self.name)
    }

    pub fn job_key(&self) -> JobKey {
        JobKey::new(&self.job_group, &self.job_name)
    }
}

impl TriggerShape for TriggerRecord {
    fn cron(&self) -> Option<CronSchedule> {
        self.cron_expression
            .clone()
            .map(|expression| CronSchedule { expression })
    }

    fn daily(&self) -> Option<DailySchedule> {
        Some(DailySchedule {
            repeat_interval: self.repeat_interval?,
            repeat_interval_unit: self.repeat_interval_unit?,
            repeat_count: self.repeat_count.unwrap_or(0),
            start_time_of_day: self.start_time_of_day?,
            end_time_of_day: self.end_time_of_day?,
            days_of_week: self.days_of_week?,
        })
    }

    /// A millisecond count outside `Duration`'s range does not form a simple shape.
    fn simple(&self) -> Option<SimpleSchedule> {
        let repeat_interval = Duration::try_milliseconds(self.repeat_interval_ms?)?;
        Some(SimpleSchedule {
            repeat_interval,
            repeat_count: self.repeat_count.unwrap_or(0),
        })
    }

    fn calendar(&self) -> Option<CalendarSchedule> {
        Some(CalendarSchedule {
            repeat_interval: self.repeat_interval?,
            repeat_interval_unit: self.repeat_interval_unit?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_schedule::{TriggerKind, classify};
    use pretty_assertions::assert_eq;

    fn record() -> TriggerRecord {
        TriggerRecord::new(
            TriggerKey::new("reports", "nightly"),
            &JobKey::new("reports", "build"),
        )
    }

    #[test]
    fn record_without_schedule_fields_is_unknown() {
        assert_eq!(classify(&record()), TriggerKind::Unknown);
    }

    #[test]
    fn daily_fields_also_satisfy_calendar() {
        let mut trigger = record();
        trigger.repeat_interval = Some(1);
        trigger.repeat_interval_unit = Some(IntervalUnit::Hour);
        assert_eq!(classify(&trigger), TriggerKind::Calendar);

        trigger.start_time_of_day = Some(TimeOfDay::new(8, 0, 0).unwrap());
        trigger.end_time_of_day = Some(TimeOfDay::new(17, 0, 0).unwrap());
        trigger.days_of_week = Some(DayOfWeekSet::all_on());
        assert!(trigger.calendar().is_some());
        assert_eq!(classify(&trigger), TriggerKind::Daily);
    }

    #[test]
    fn missing_groups_default() {
        let trigger: TriggerRecord = serde_json::from_str(
            r#"{"name": "t", "job_name": "j", "repeat_interval_ms": 5000}"#,
        )
        .unwrap();
        assert_eq!(trigger.key(), TriggerKey::new(DEFAULT_GROUP, "t"));
        assert_eq!(trigger.job_key(), JobKey::new(DEFAULT_GROUP, "j"));
        assert_eq!(classify(&trigger), TriggerKind::Simple);
    }

    #[test]
    fn bad_weekday_in_record_fails_to_parse() {
        let result = serde_json::from_str::<TriggerRecord>(
            r#"{"name": "t", "job_name": "j", "days_of_week": ["Monday", "Funday"]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_interval_rejected_on_load() {
        let result = serde_json::from_str::<TriggerRecord>(
            r#"{"name": "t", "job_name": "j", "repeat_interval_ms": -9223372036854775808}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("repeat_interval_ms out of range"), "{err}");
    }

    #[test]
    fn out_of_range_interval_classifies_without_panicking() {
        let mut trigger = record();
        trigger.repeat_interval_ms = Some(i64::MIN);
        assert!(trigger.simple().is_none());
        assert_eq!(classify(&trigger), TriggerKind::Unknown);

        trigger.repeat_interval_ms = Some(i64::MAX);
        assert_eq!(classify(&trigger), TriggerKind::Simple);
    }

    #[test]
    fn key_display() {
        assert_eq!(JobKey::new("reports", "build").to_string(), "reports.build");
    }
}
