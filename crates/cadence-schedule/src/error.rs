//! Error types for schedule classification and descriptions.

use chrono::Duration;
use thiserror::Error;

/// Errors that can occur while ingesting or describing a trigger schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A weekday name that is not one of the seven recognized days.
    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),

    /// A time of day with an out-of-range field, or an unparseable one.
    #[error("invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    /// Negative duration, or one that is not a whole number of milliseconds.
    #[error("duration must be a non-negative whole number of milliseconds, got {0}")]
    InvalidDuration(Duration),

    /// Repeat interval magnitude below 1.
    #[error("repeat interval must be at least 1, got {0}")]
    InvalidInterval(i32),

    /// Daily trigger without any active day.
    #[error("daily trigger has no active days of week")]
    NoActiveDays,

    /// The cron expression was rejected by the parser.
    #[error("invalid cron expression '{expression}': {source}")]
    Cron {
        expression: String,
        #[source]
        source: cron::error::Error,
    },

    /// A day-of-month or day-of-week field using `L`, `W` or `#` incorrectly.
    #[error("invalid cron expression '{expression}': bad day field '{field}'")]
    CronDayField { expression: String, field: String },
}
