//! Trigger classification and schedule descriptions for Cadence.
//!
//! This crate provides:
//! - Classification of scheduler triggers into cron, daily, simple and
//!   calendar kinds
//! - English descriptions of when a trigger fires
//! - Time-of-day, weekday set and duration helpers used by the descriptions
//!
//! Everything here is pure: no clock, no I/O, no shared mutable state.

mod cron_text;
mod days;
mod describe;
mod duration;
mod error;
mod interval;
mod time_of_day;
mod trigger;

pub use cron_text::{CronTranslator, EnglishCron};
pub use days::{DayOfWeekSet, day_name};
pub use describe::describe;
pub use duration::{DURATION_PARTS, DurationComponent, DurationPart, join_components, partition};
pub use error::ScheduleError;
pub use interval::IntervalUnit;
pub use time_of_day::TimeOfDay;
pub use trigger::{
    CalendarSchedule, CronSchedule, DailySchedule, Schedule, SimpleSchedule, TriggerKind,
    TriggerShape, classify,
};
