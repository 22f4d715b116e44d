use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component order of slash-separated dates in a dataset.
///
/// A dataset uses exactly one order. Ambiguous strings such as "03/04/2025"
/// are read according to this setting and never guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::DayFirst => write!(f, "D/M/YYYY"),
            DateOrder::MonthFirst => write!(f, "M/D/YYYY"),
        }
    }
}

/// Parse a `D/M/YYYY` (or `M/D/YYYY`) date.
///
/// Returns None unless the string has exactly three numeric parts that form
/// a real calendar date, so "31/4/2025" and "29/2/2025" are rejected.
pub fn parse_date(s: &str, order: DateOrder) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.trim().split('/').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    let (day, month) = match order {
        DateOrder::DayFirst => (first, second),
        DateOrder::MonthFirst => (second, first),
    };

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1..=9999).contains(&year) {
        return None;
    }

    // from_ymd_opt refuses day 31 of a 30-day month and the like
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date back into the dataset's slash notation.
pub fn format_date(date: NaiveDate, order: DateOrder) -> String {
    match order {
        DateOrder::DayFirst => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        DateOrder::MonthFirst => format!("{}/{}/{}", date.month(), date.day(), date.year()),
    }
}

/// Week-of-year key in `YYYY-WW` form.
///
/// Weeks start on Sunday; week 01 is the (possibly partial) week containing
/// January 1st. The year prefix keeps late-December and early-January
/// records in different buckets.
pub fn week_bucket(date: NaiveDate) -> String {
    let year = date.year();
    let jan1_offset = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let day_of_year = date.ordinal0();
    let week = (day_of_year + jan1_offset + 1).div_ceil(7);
    format!("{year}-{week:02}")
}

/// Calendar-month key in `YYYY-MM` form.
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}
