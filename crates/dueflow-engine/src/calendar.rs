//! Local-calendar arithmetic shared by every rule variant.
//!
//! Dates are [`NaiveDate`] values: a calendar day with no time-of-day and no
//! timezone, which is what "local midnight" means for due dates. Nothing in this
//! module fails on well-formed input; arithmetic that would leave chrono's
//! representable range saturates at [`NaiveDate::MIN`] / [`NaiveDate::MAX`].

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A day-of-month forced into a specific month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedDay {
    pub date: NaiveDate,
    /// Whether the requested day differed from the day actually used.
    pub was_clamped: bool,
}

fn saturate(forward: bool) -> NaiveDate {
    if forward {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    }
}

/// Build a date from a year, a zero-based month index and a day.
///
/// Overflowing months and days roll into neighbouring months/years, so
/// `local_date(2024, 12, 1)` is 2025-01-01 and `local_date(2025, 2, 0)` is
/// 2025-02-28.
pub fn local_date(year: i32, month0: i32, day: i32) -> NaiveDate {
    let total_months = i64::from(year) * 12 + i64::from(month0);
    let month = total_months.rem_euclid(12) as u32 + 1;
    let Ok(year) = i32::try_from(total_months.div_euclid(12)) else {
        return saturate(total_months > 0);
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => add_days(first, i64::from(day) - 1),
        None => saturate(year > 0),
    }
}

/// Shift a date by `days` calendar days (negative moves backwards).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or_else(|| saturate(days >= 0))
}

/// Shift a date by `months`, clamping the day to the destination month's
/// last day (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let anchor = local_date(date.year(), (date.month0() as i32).saturating_add(months), 1);
    let day = date.day().min(days_in_month(anchor));
    add_days(anchor, i64::from(day) - 1)
}

/// First day of the month after `date`'s month, or `None` past [`NaiveDate::MAX`].
///
/// Unlike [`add_months`] this never saturates, so callers that must move
/// forward can tell when they could not.
pub fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    start_of_month(date).checked_add_months(Months::new(1))
}

/// Drop the time-of-day, keeping the calendar day.
pub fn start_of_day(datetime: NaiveDateTime) -> NaiveDate {
    datetime.date()
}

/// First day of the date's month.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.day0()))
}

/// Number of days in the date's month (28..=31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if date.leap_year() => 29,
        _ => 28,
    }
}

/// Place `day` inside the month of `month_anchor`, clamped to `[1, days_in_month]`.
///
/// This is the only place a nominal day-of-month is mapped onto a real month;
/// every "estimated" flag the engine reports for clamping comes from here.
pub fn clamp_day_of_month(month_anchor: NaiveDate, day: u32) -> ClampedDay {
    let clamped = day.clamp(1, days_in_month(month_anchor));
    ClampedDay {
        date: add_days(start_of_month(month_anchor), i64::from(clamped) - 1),
        was_clamped: clamped != day,
    }
}

/// Weekday number with Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Parse a `YYYY-MM-DD` string as a plain calendar date.
///
/// # Errors
/// Returns `EngineError::InvalidDate` if the string is not a valid calendar date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
