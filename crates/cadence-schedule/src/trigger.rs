//! Trigger shapes and classification.
//!
//! A scheduler trigger record may expose the fields of more than one shape.
//! [`Schedule::resolve`] settles that once, checking shapes in the fixed
//! priority order cron, daily, simple, calendar.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{DayOfWeekSet, IntervalUnit, TimeOfDay};

/// Canonical kind of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Cron,
    Daily,
    Simple,
    Calendar,
    Unknown,
}

impl TriggerKind {
    /// Lower-case name, as serialized.
    pub fn name(&self) -> &'static str {
        match self {
            TriggerKind::Cron => "cron",
            TriggerKind::Daily => "daily",
            TriggerKind::Simple => "simple",
            TriggerKind::Calendar => "calendar",
            TriggerKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fires according to a cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    pub expression: String,
}

/// Fires every `repeat_interval`, optionally a bounded number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSchedule {
    pub repeat_interval: Duration,
    /// Values of zero or below (including the -1 "forever" sentinel) mean
    /// no bound is shown.
    pub repeat_count: i32,
}

/// Fires every `repeat_interval` calendar units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSchedule {
    pub repeat_interval: i32,
    pub repeat_interval_unit: IntervalUnit,
}

/// Fires every interval between two times of day on selected weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    pub repeat_interval: i32,
    pub repeat_interval_unit: IntervalUnit,
    pub repeat_count: i32,
    pub start_time_of_day: TimeOfDay,
    pub end_time_of_day: TimeOfDay,
    pub days_of_week: DayOfWeekSet,
}

/// A trigger schedule with its kind decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Cron(CronSchedule),
    Daily(DailySchedule),
    Simple(SimpleSchedule),
    Calendar(CalendarSchedule),
}

/// Capability view over a scheduler trigger record.
///
/// Each method returns the shape's fields when the record satisfies that
/// shape. A record may satisfy several shapes at once.
pub trait TriggerShape {
    fn cron(&self) -> Option<CronSchedule> {
        None
    }

    fn daily(&self) -> Option<DailySchedule> {
        None
    }

    fn simple(&self) -> Option<SimpleSchedule> {
        None
    }

    fn calendar(&self) -> Option<CalendarSchedule> {
        None
    }
}

impl Schedule {
    /// Pick the highest-priority shape the trigger satisfies.
    pub fn resolve<T: TriggerShape + ?Sized>(trigger: &T) -> Option<Schedule> {
        if let Some(cron) = trigger.cron() {
            return Some(Schedule::Cron(cron));
        }
        if let Some(daily) = trigger.daily() {
            return Some(Schedule::Daily(daily));
        }
        if let Some(simple) = trigger.simple() {
            return Some(Schedule::Simple(simple));
        }
        trigger.calendar().map(Schedule::Calendar)
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            Schedule::Cron(_) => TriggerKind::Cron,
            Schedule::Daily(_) => TriggerKind::Daily,
            Schedule::Simple(_) => TriggerKind::Simple,
            Schedule::Calendar(_) => TriggerKind::Calendar,
        }
    }
}

impl TriggerShape for Schedule {
    fn cron(&self) -> Option<CronSchedule> {
        match self {
            Schedule::Cron(cron) => Some(cron.clone()),
            _ => None,
        }
    }

    fn daily(&self) -> Option<DailySchedule> {
        match self {
            Schedule::Daily(daily) => Some(daily.clone()),
            _ => None,
        }
    }

    fn simple(&self) -> Option<SimpleSchedule> {
        match self {
            Schedule::Simple(simple) => Some(simple.clone()),
            _ => None,
        }
    }

    fn calendar(&self) -> Option<CalendarSchedule> {
        match self {
            Schedule::Calendar(calendar) => Some(calendar.clone()),
            _ => None,
        }
    }
}

/// Classify a trigger. Never fails; `Unknown` when no shape matches.
pub fn classify<T: TriggerShape + ?Sized>(trigger: &T) -> TriggerKind {
    Schedule::resolve(trigger).map_or(TriggerKind::Unknown, |schedule| schedule.kind())
}
