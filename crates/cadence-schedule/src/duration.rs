//! Decomposition of intervals into day/hour/minute/second/millisecond parts.

use std::fmt;

use chrono::Duration;

use crate::ScheduleError;

/// A named unit used when spelling out a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPart {
    pub singular: &'static str,
    pub plural: &'static str,
    pub millis: i64,
}

/// Units largest first. Partitioning walks this table in order.
pub const DURATION_PARTS: [DurationPart; 5] = [
    DurationPart {
        singular: "day",
        plural: "days",
        millis: 1000 * 60 * 60 * 24,
    },
    DurationPart {
        singular: "hour",
        plural: "hours",
        millis: 1000 * 60 * 60,
    },
    DurationPart {
        singular: "minute",
        plural: "minutes",
        millis: 1000 * 60,
    },
    DurationPart {
        singular: "second",
        plural: "seconds",
        millis: 1000,
    },
    DurationPart {
        singular: "millisecond",
        plural: "milliseconds",
        millis: 1,
    },
];

/// A non-zero count of one unit, e.g. `30 seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationComponent {
    pub value: i64,
    pub part: &'static DurationPart,
}

impl fmt::Display for DurationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.value == 1 {
            self.part.singular
        } else {
            self.part.plural
        };
        write!(f, "{} {}", self.value, name)
    }
}

/// Split `interval` into its non-zero unit counts, largest unit first.
///
/// A zero interval yields an empty list. Negative intervals and intervals
/// with a sub-millisecond remainder are rejected.
pub fn partition(interval: Duration) -> Result<Vec<DurationComponent>, ScheduleError> {
    let total = interval.num_milliseconds();
    if total < 0 || Duration::milliseconds(total) != interval {
        return Err(ScheduleError::InvalidDuration(interval));
    }

    let mut remaining = total;
    let mut components = Vec::new();
    for part in &DURATION_PARTS {
        let value = remaining / part.millis;
        remaining -= value * part.millis;
        if value >= 1 {
            components.push(DurationComponent { value, part });
        }
    }
    debug_assert_eq!(remaining, 0);

    Ok(components)
}

/// Render components as `"1 minute, 30 seconds"`.
pub fn join_components(components: &[DurationComponent]) -> String {
    components
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
