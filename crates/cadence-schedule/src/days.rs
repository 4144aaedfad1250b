//! Sets of active weekdays for daily time-window triggers.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::ScheduleError;

/// All seven days, Monday first.
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL_DAYS: u8 = 0b111_1111;
const WEEKDAYS: u8 = 0b001_1111;
const WEEKEND: u8 = 0b110_0000;

/// A set of weekdays stored as seven flags, bit 0 = Monday.
///
/// Serialized as a list of full day names in Monday-first order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DayOfWeekSet(u8);

impl DayOfWeekSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week.
    pub fn all_on() -> Self {
        Self(ALL_DAYS)
    }

    /// Build a set from any collection of days. Duplicates collapse.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        days.into_iter().collect()
    }

    /// Build a set from day names such as `"Monday"` or `"mon"`.
    ///
    /// Fails on the first name that is not one of the seven days.
    pub fn from_names<I, S>(names: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for name in names {
            let name = name.as_ref();
            let day = name
                .trim()
                .parse::<Weekday>()
                .map_err(|_| ScheduleError::InvalidWeekday(name.to_string()))?;
            set.insert(day);
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when all seven days are set.
    pub fn is_full(&self) -> bool {
        self.0 == ALL_DAYS
    }

    /// True when exactly Monday through Friday are set.
    pub fn is_weekdays_only(&self) -> bool {
        self.0 == WEEKDAYS
    }

    /// True when exactly Saturday and Sunday are set.
    pub fn is_weekend_only(&self) -> bool {
        self.0 == WEEKEND
    }

    /// Members of the set in Monday-first order.
    pub fn selected(&self) -> Vec<Weekday> {
        WEEK.into_iter().filter(|day| self.contains(*day)).collect()
    }
}

impl FromIterator<Weekday> for DayOfWeekSet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<String>> for DayOfWeekSet {
    type Error = ScheduleError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_names(value)
    }
}

impl From<DayOfWeekSet> for Vec<String> {
    fn from(value: DayOfWeekSet) -> Self {
        value
            .selected()
            .into_iter()
            .map(|day| day_name(day).to_string())
            .collect()
    }
}

/// Full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}
