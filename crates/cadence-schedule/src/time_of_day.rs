//! Wall-clock time of day, independent of date and timezone.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::ScheduleError;

/// A time within a day with second precision.
///
/// Serialized as `"HH:MM:SS"`. Deserialization also accepts `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Create a time of day, rejecting out-of-range fields.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, ScheduleError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| {
                ScheduleError::InvalidTimeOfDay(format!("{hour:02}:{minute:02}:{second:02}"))
            })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Time elapsed since midnight.
    pub fn to_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.0.num_seconds_from_midnight()))
    }

    /// Short display form: `H:MM`, or `H:MM:SS` when seconds are non-zero.
    pub fn to_short_format(&self) -> String {
        let pattern = if self.second() == 0 { "%-H:%M" } else { "%-H:%M:%S" };
        self.0.format(pattern).to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTimeOfDay(s.to_string());

        let fields = s
            .trim()
            .split(':')
            .map(|field| field.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        match fields.as_slice() {
            [hour, minute] => Self::new(*hour, *minute, 0),
            [hour, minute, second] => Self::new(*hour, *minute, *second),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
