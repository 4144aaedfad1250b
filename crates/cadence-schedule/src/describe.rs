//! Human-readable descriptions of trigger schedules.

use crate::days::day_name;
use crate::duration::{join_components, partition};
use crate::trigger::{CalendarSchedule, DailySchedule, Schedule, SimpleSchedule, TriggerShape};
use crate::{CronTranslator, IntervalUnit, ScheduleError};

/// Describe a trigger, or `None` when it matches no known shape.
pub fn describe<T: TriggerShape + ?Sized>(
    trigger: &T,
    cron: &dyn CronTranslator,
) -> Result<Option<String>, ScheduleError> {
    Schedule::resolve(trigger)
        .map(|schedule| schedule.describe(cron))
        .transpose()
}

impl Schedule {
    pub fn describe(&self, cron: &dyn CronTranslator) -> Result<String, ScheduleError> {
        match self {
            Schedule::Cron(schedule) => cron.describe(&schedule.expression),
            Schedule::Daily(schedule) => schedule.describe(),
            Schedule::Simple(schedule) => schedule.describe(),
            Schedule::Calendar(schedule) => schedule.describe(),
        }
    }
}

impl SimpleSchedule {
    /// `"Repeat 3 times every 1 minute, 30 seconds"`.
    pub fn describe(&self) -> Result<String, ScheduleError> {
        let components = partition(self.repeat_interval)?;
        Ok(format!(
            "{}{}",
            repeat_prefix(self.repeat_count),
            join_components(&components)
        ))
    }
}

impl CalendarSchedule {
    /// `"Repeat every 2 days"`. The unit is used as given, never converted.
    pub fn describe(&self) -> Result<String, ScheduleError> {
        interval_clause(self.repeat_interval, self.repeat_interval_unit, 0)
    }
}

impl DailySchedule {
    /// `"Repeat every hour from 8:00 to 17:00 only on Weekdays"`.
    pub fn describe(&self) -> Result<String, ScheduleError> {
        if self.days_of_week.is_empty() {
            return Err(ScheduleError::NoActiveDays);
        }

        let mut result = interval_clause(
            self.repeat_interval,
            self.repeat_interval_unit,
            self.repeat_count,
        )?;
        result.push_str(&format!(
            " from {} to {}",
            self.start_time_of_day.to_short_format(),
            self.end_time_of_day.to_short_format()
        ));

        let days = &self.days_of_week;
        if !days.is_full() {
            if days.is_weekdays_only() {
                result.push_str(" only on Weekdays");
            } else if days.is_weekend_only() {
                result.push_str(" only on Weekends");
            } else {
                let names: Vec<&str> = days.selected().into_iter().map(day_name).collect();
                result.push_str(&format!(" on {}", names.join(", ")));
            }
        }

        Ok(result)
    }
}

fn repeat_prefix(count: i32) -> String {
    if count > 0 {
        format!("Repeat {count} times every ")
    } else {
        "Repeat every ".to_string()
    }
}

fn interval_clause(
    magnitude: i32,
    unit: IntervalUnit,
    count: i32,
) -> Result<String, ScheduleError> {
    if magnitude < 1 {
        return Err(ScheduleError::InvalidInterval(magnitude));
    }

    let interval = if magnitude == 1 {
        unit.name().to_string()
    } else {
        format!("{magnitude} {}s", unit.name())
    };
    Ok(format!("{}{interval}", repeat_prefix(count)))
}
