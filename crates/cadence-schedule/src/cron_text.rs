//! Cron expression to English.
//!
//! Expressions use the Quartz field layout:
//! `sec min hour day-of-month month day-of-week [year]`, with day-of-week
//! numbered 1 = Sunday through 7 = Saturday. Five-field expressions are
//! accepted and get a leading `0` seconds field. Quartz's `L`, `W` and `#`
//! day tokens are checked here, since the `cron` crate rejects them.

use std::str::FromStr;

use chrono::{Month, Weekday};

use crate::ScheduleError;
use crate::days::day_name;

/// Turns a cron expression into a human-readable sentence.
pub trait CronTranslator: Send + Sync {
    fn describe(&self, expression: &str) -> Result<String, ScheduleError>;
}

/// Default translator: validates with the `cron` crate, then spells the
/// fields out in English.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCron;

impl CronTranslator for EnglishCron {
    fn describe(&self, expression: &str) -> Result<String, ScheduleError> {
        let normalized = normalize_cron(expression);
        let fields: Vec<&str> = normalized.split_whitespace().collect();

        let days = QuartzDays::parse(&fields).map_err(|field| ScheduleError::CronDayField {
            expression: expression.to_string(),
            field,
        })?;

        // Quartz-only day fields are checked above; the parser sees `*` instead.
        let checked: Vec<&str> = fields
            .iter()
            .enumerate()
            .map(|(index, field)| match index {
                3 if days.month_day.is_some() => "*",
                5 if days.week_day.is_some() => "*",
                _ => *field,
            })
            .collect();
        cron::Schedule::from_str(&checked.join(" ")).map_err(|source| ScheduleError::Cron {
            expression: expression.to_string(),
            source,
        })?;

        Ok(render(&fields, &days))
    }
}

/// Expand `@` shortcuts, add a seconds field to 5-field expressions and
/// replace Quartz's `?` placeholder with `*`.
pub(crate) fn normalize_cron(expression: &str) -> String {
    let trimmed = expression.trim();
    let expanded = match trimmed.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => "0 0 0 1 1 *",
        "@monthly" => "0 0 0 1 * *",
        "@weekly" => "0 0 0 * * 1",
        "@daily" | "@midnight" => "0 0 0 * * *",
        "@hourly" => "0 0 * * * *",
        _ => trimmed,
    };

    let mut fields: Vec<&str> = expanded
        .split_whitespace()
        .map(|field| if field == "?" { "*" } else { field })
        .collect();
    if fields.len() == 5 {
        fields.insert(0, "0");
    }
    fields.join(" ")
}

fn render(fields: &[&str], days: &QuartzDays) -> String {
    let field = |index: usize| fields.get(index).copied().unwrap_or("*");

    let mut clauses = time_clauses(field(0), field(1), field(2));
    match &days.month_day {
        Some(special) => clauses.push(special.phrase()),
        None => clauses.extend(day_of_month_clause(field(3))),
    }
    match &days.week_day {
        Some(special) => clauses.push(special.phrase()),
        None => clauses.extend(day_of_week_clause(field(5))),
    }
    clauses.extend(month_clause(field(4)));
    clauses.extend(fields.get(6).and_then(|year| year_clause(year)));

    capitalize(&clauses.join(", "))
}

/// Quartz day-of-month forms the `cron` crate does not accept.
#[derive(Debug, PartialEq, Eq)]
enum MonthDay {
    /// `L`
    Last,
    /// `LW`
    LastWeekday,
    /// `L-n`
    BeforeLast(u32),
    /// `nW`
    NearestWeekday(u32),
}

/// Quartz day-of-week forms the `cron` crate does not accept.
#[derive(Debug, PartialEq, Eq)]
enum WeekDay {
    /// A bare `L`, which Quartz reads as Saturday.
    Saturday,
    /// `dL`: the last given weekday of the month.
    LastOf(Weekday),
    /// `d#n`: the n-th given weekday of the month.
    Nth(Weekday, u32),
}

/// Special day fields of an expression. A field holding `L`, `W` or `#`
/// must parse as one of the forms above.
#[derive(Debug, Default)]
struct QuartzDays {
    month_day: Option<MonthDay>,
    week_day: Option<WeekDay>,
}

impl QuartzDays {
    /// Returns the offending field on failure.
    fn parse(fields: &[&str]) -> Result<Self, String> {
        let mut days = Self::default();

        if let Some(raw) = fields.get(3) {
            let upper = raw.to_ascii_uppercase();
            if upper.contains('L') || upper.contains('W') {
                days.month_day = Some(MonthDay::parse(&upper).ok_or_else(|| raw.to_string())?);
            }
        }

        if let Some(raw) = fields.get(5) {
            let upper = raw.to_ascii_uppercase();
            if upper.contains('#') || upper.ends_with('L') {
                days.week_day = Some(WeekDay::parse(&upper).ok_or_else(|| raw.to_string())?);
            }
        }

        Ok(days)
    }
}

impl MonthDay {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "L" => Some(MonthDay::Last),
            "LW" => Some(MonthDay::LastWeekday),
            _ => {
                if let Some(offset) = raw.strip_prefix("L-") {
                    number(offset)
                        .filter(|n| (1..=30).contains(n))
                        .map(MonthDay::BeforeLast)
                } else {
                    raw.strip_suffix('W')
                        .and_then(number)
                        .filter(|n| (1..=31).contains(n))
                        .map(MonthDay::NearestWeekday)
                }
            }
        }
    }

    fn phrase(&self) -> String {
        match self {
            MonthDay::Last => "on the last day of the month".to_string(),
            MonthDay::LastWeekday => "on the last weekday of the month".to_string(),
            MonthDay::BeforeLast(1) => "1 day before the last day of the month".to_string(),
            MonthDay::BeforeLast(n) => format!("{n} days before the last day of the month"),
            MonthDay::NearestWeekday(n) => format!("on the weekday nearest day {n} of the month"),
        }
    }
}

impl WeekDay {
    fn parse(raw: &str) -> Option<Self> {
        if raw == "L" {
            return Some(WeekDay::Saturday);
        }
        if let Some((day, nth)) = raw.split_once('#') {
            let nth = number(nth).filter(|n| (1..=5).contains(n))?;
            return weekday(day).map(|day| WeekDay::Nth(day, nth));
        }
        raw.strip_suffix('L').and_then(weekday).map(WeekDay::LastOf)
    }

    fn phrase(&self) -> String {
        match self {
            WeekDay::Saturday => "only on Saturday".to_string(),
            WeekDay::LastOf(day) => format!("on the last {} of the month", day_name(*day)),
            WeekDay::Nth(day, nth) => {
                format!("on the {} {} of the month", ordinal(*nth), day_name(*day))
            }
        }
    }
}

fn ordinal(n: u32) -> &'static str {
    match n {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        _ => "fifth",
    }
}

/// Parsed shape of a single cron field.
enum Field<'a> {
    Any,
    Single(&'a str),
    Range(&'a str, &'a str),
    List(Vec<&'a str>),
    Step { base: &'a str, step: &'a str },
}

impl<'a> Field<'a> {
    fn parse(raw: &'a str) -> Self {
        if raw == "*" {
            Field::Any
        } else if let Some((base, step)) = raw.split_once('/') {
            Field::Step { base, step }
        } else if raw.contains(',') {
            Field::List(raw.split(',').collect())
        } else if let Some((from, to)) = raw.split_once('-') {
            Field::Range(from, to)
        } else {
            Field::Single(raw)
        }
    }
}

fn number(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

fn time_clauses(sec: &str, min: &str, hour: &str) -> Vec<String> {
    if let (Some(s), Some(m)) = (number(sec), number(min)) {
        if let Some(h) = number(hour) {
            return vec![format!("at {}", clock(h, m, s))];
        }
        if let Field::List(hours) = Field::parse(hour) {
            let times: Option<Vec<String>> = hours
                .iter()
                .map(|h| number(h).map(|h| clock(h, m, s)))
                .collect();
            if let Some(times) = times {
                return vec![format!("at {}", join_natural(&times))];
            }
        }
    }

    let mut clauses = Vec::new();

    match sec {
        "0" => {}
        "*" => clauses.push("every second".to_string()),
        _ => clauses.push(unit_phrase(sec, "second")),
    }
    let sec_repeats = matches!(Field::parse(sec), Field::Any | Field::Step { .. });

    let hour_field = Field::parse(hour);
    match min {
        "*" if sec_repeats => {}
        "*" => clauses.push("every minute".to_string()),
        "0" if sec == "0" => {
            if matches!(hour_field, Field::Any | Field::Range(..)) {
                clauses.push("every hour".to_string());
            }
        }
        _ if hour == "*" && number(min).is_some() => {
            clauses.push(format!("at minute {min} of every hour"))
        }
        _ => clauses.push(unit_phrase(min, "minute")),
    }

    match hour_field {
        Field::Any => {}
        Field::Single(h) => clauses.push(format!("between {} and {}", hour_start(h), hour_end(h))),
        Field::Range(from, to) => {
            clauses.push(format!("between {} and {}", hour_start(from), hour_end(to)))
        }
        _ => clauses.push(unit_phrase(hour, "hour")),
    }

    clauses
}

fn clock(h: u32, m: u32, s: u32) -> String {
    if s == 0 {
        format!("{h:02}:{m:02}")
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}

fn hour_start(raw: &str) -> String {
    match number(raw) {
        Some(h) => format!("{h:02}:00"),
        None => raw.to_string(),
    }
}

fn hour_end(raw: &str) -> String {
    match number(raw) {
        Some(h) => format!("{h:02}:59"),
        None => raw.to_string(),
    }
}

/// Generic phrase for a second/minute/hour field.
fn unit_phrase(raw: &str, unit: &str) -> String {
    match Field::parse(raw) {
        Field::Any => format!("every {unit}"),
        Field::Single(value) => format!("at {unit} {value}"),
        Field::Range(from, to) => format!("{unit}s {from} through {to}"),
        Field::List(values) => format!("at {unit}s {}", join_natural(&values)),
        Field::Step { base, step } => {
            let every = every_n(step, unit);
            match base {
                "*" | "0" => every,
                _ => format!("{every}, starting at {unit} {base}"),
            }
        }
    }
}

fn every_n(step: &str, unit: &str) -> String {
    if step == "1" {
        format!("every {unit}")
    } else {
        format!("every {step} {unit}s")
    }
}

fn day_of_month_clause(raw: &str) -> Option<String> {
    let clause = match Field::parse(raw) {
        Field::Any => return None,
        Field::Single(day) => format!("on day {day} of the month"),
        Field::Range(from, to) => format!("between day {from} and {to} of the month"),
        Field::List(days) => format!("on days {} of the month", join_natural(&days)),
        Field::Step { base, step } => match base {
            "*" | "1" => every_n(step, "day"),
            _ => format!("{}, starting on day {base} of the month", every_n(step, "day")),
        },
    };
    Some(clause)
}

fn day_of_week_clause(raw: &str) -> Option<String> {
    let clause = match Field::parse(raw) {
        Field::Any => return None,
        Field::Single(day) => format!("only on {}", weekday_label(day)),
        Field::Range(from, to) => format!("{} through {}", weekday_label(from), weekday_label(to)),
        Field::List(days) => {
            let labels: Vec<String> = days.iter().map(|day| ranged(day, weekday_label)).collect();
            format!("only on {}", join_natural(&labels))
        }
        Field::Step { step, .. } => format!("every {step} days of the week"),
    };
    Some(clause)
}

fn month_clause(raw: &str) -> Option<String> {
    let clause = match Field::parse(raw) {
        Field::Any => return None,
        Field::Single(month) => format!("only in {}", month_label(month)),
        Field::Range(from, to) => format!("{} through {}", month_label(from), month_label(to)),
        Field::List(months) => {
            let labels: Vec<String> = months.iter().map(|m| ranged(m, month_label)).collect();
            format!("only in {}", join_natural(&labels))
        }
        Field::Step { step, .. } => every_n(step, "month"),
    };
    Some(clause)
}

fn year_clause(raw: &str) -> Option<String> {
    let clause = match Field::parse(raw) {
        Field::Any => return None,
        Field::Single(year) => format!("only in {year}"),
        Field::Range(from, to) => format!("{from} through {to}"),
        Field::List(years) => format!("only in {}", join_natural(&years)),
        Field::Step { step, .. } => every_n(step, "year"),
    };
    Some(clause)
}

/// Label a list item that may itself be a range, e.g. `MON-WED`.
fn ranged(raw: &str, label: fn(&str) -> String) -> String {
    match raw.split_once('-') {
        Some((from, to)) => format!("{} through {}", label(from), label(to)),
        None => label(raw),
    }
}

/// A Quartz day-of-week number (1 = Sunday) or day name.
fn weekday(raw: &str) -> Option<Weekday> {
    match number(raw) {
        Some(n @ 1..=7) => Weekday::try_from((n as u8 + 5) % 7).ok(),
        Some(_) => None,
        None => raw.parse::<Weekday>().ok(),
    }
}

fn weekday_label(raw: &str) -> String {
    weekday(raw).map_or_else(|| raw.to_string(), |day| day_name(day).to_string())
}

fn month_label(raw: &str) -> String {
    let month = match number(raw) {
        Some(n) => u8::try_from(n).ok().and_then(|n| Month::try_from(n).ok()),
        None => raw.parse::<Month>().ok(),
    };
    month.map_or_else(|| raw.to_string(), |month| month.name().to_string())
}

fn join_natural<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
