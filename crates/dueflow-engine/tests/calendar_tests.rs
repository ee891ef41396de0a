//! Tests for local-calendar arithmetic.

use chrono::NaiveDate;
use dueflow_engine::calendar::{
    add_days, add_months, clamp_day_of_month, days_in_month, format_iso_date, local_date,
    next_month_start, parse_iso_date, start_of_day, start_of_month, weekday_index,
};
use dueflow_engine::EngineError;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ---------------------------------------------------------------------------
// local_date
// ---------------------------------------------------------------------------

#[test]
fn local_date_uses_zero_based_month() {
    assert_eq!(local_date(2025, 0, 15), date(2025, 1, 15));
    assert_eq!(local_date(2025, 11, 31), date(2025, 12, 31));
}

#[test]
fn local_date_rolls_overflowing_month_into_next_year() {
    assert_eq!(local_date(2024, 12, 1), date(2025, 1, 1));
    assert_eq!(local_date(2025, -1, 1), date(2024, 12, 1));
}

#[test]
fn local_date_day_zero_is_last_day_of_previous_month() {
    // Month index 2 is March; day 0 of March is the last day of February.
    assert_eq!(local_date(2025, 2, 0), date(2025, 2, 28));
    assert_eq!(local_date(2024, 2, 0), date(2024, 2, 29));
}

#[test]
fn local_date_day_past_month_end_rolls_forward() {
    assert_eq!(local_date(2025, 1, 30), date(2025, 3, 2));
}

// ---------------------------------------------------------------------------
// add_days / add_months
// ---------------------------------------------------------------------------

#[test]
fn add_days_crosses_month_and_year_boundaries() {
    assert_eq!(add_days(date(2025, 1, 31), 1), date(2025, 2, 1));
    assert_eq!(add_days(date(2025, 12, 31), 1), date(2026, 1, 1));
    assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
}

#[test]
fn add_days_negative_moves_backwards() {
    assert_eq!(add_days(date(2025, 3, 1), -1), date(2025, 2, 28));
    assert_eq!(add_days(date(2025, 1, 13), -8), date(2025, 1, 5));
}

#[test]
fn add_days_saturates_at_representable_range() {
    assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
}

#[test]
fn add_months_clamps_to_destination_month_end() {
    assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
    assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(add_months(date(2025, 3, 31), -1), date(2025, 2, 28));
    assert_eq!(add_months(date(2025, 1, 31), -2), date(2024, 11, 30));
}

#[test]
fn add_months_keeps_day_when_it_exists() {
    assert_eq!(add_months(date(2025, 11, 15), 3), date(2026, 2, 15));
    assert_eq!(add_months(date(2025, 5, 1), 0), date(2025, 5, 1));
}

#[test]
fn next_month_start_crosses_year_end() {
    assert_eq!(next_month_start(date(2025, 1, 31)), Some(date(2025, 2, 1)));
    assert_eq!(next_month_start(date(2025, 12, 15)), Some(date(2026, 1, 1)));
}

#[test]
fn next_month_start_is_none_in_last_representable_month() {
    assert_eq!(next_month_start(NaiveDate::MAX), None);
    assert_eq!(next_month_start(start_of_month(NaiveDate::MAX)), None);
}

// ---------------------------------------------------------------------------
// start_of_day / start_of_month / days_in_month
// ---------------------------------------------------------------------------

#[test]
fn start_of_day_drops_time() {
    let late = date(2025, 1, 10).and_hms_opt(23, 59, 59).unwrap();
    assert_eq!(start_of_day(late), date(2025, 1, 10));
}

#[test]
fn start_of_month_returns_first_day() {
    assert_eq!(start_of_month(date(2025, 2, 28)), date(2025, 2, 1));
    assert_eq!(start_of_month(date(2025, 7, 1)), date(2025, 7, 1));
}

#[test]
fn days_in_month_handles_leap_years() {
    assert_eq!(days_in_month(date(2025, 2, 10)), 28);
    assert_eq!(days_in_month(date(2024, 2, 10)), 29);
    assert_eq!(days_in_month(date(1900, 2, 1)), 28);
    assert_eq!(days_in_month(date(2000, 2, 1)), 29);
    assert_eq!(days_in_month(date(2025, 4, 1)), 30);
    assert_eq!(days_in_month(date(2025, 12, 1)), 31);
}

#[test]
fn days_in_month_at_calendar_extremes() {
    assert_eq!(days_in_month(NaiveDate::MAX), 31);
    assert_eq!(days_in_month(NaiveDate::MIN), 31);
}

// ---------------------------------------------------------------------------
// clamp_day_of_month
// ---------------------------------------------------------------------------

#[test]
fn clamp_day_31_in_february() {
    let clamped = clamp_day_of_month(date(2025, 2, 1), 31);
    assert_eq!(clamped.date, date(2025, 2, 28));
    assert!(clamped.was_clamped);
}

#[test]
fn clamp_existing_day_is_not_flagged() {
    let clamped = clamp_day_of_month(date(2025, 2, 1), 15);
    assert_eq!(clamped.date, date(2025, 2, 15));
    assert!(!clamped.was_clamped);

    let clamped = clamp_day_of_month(date(2025, 1, 20), 31);
    assert_eq!(clamped.date, date(2025, 1, 31));
    assert!(!clamped.was_clamped);
}

#[test]
fn clamp_uses_anchor_month_not_anchor_day() {
    let clamped = clamp_day_of_month(date(2025, 4, 17), 31);
    assert_eq!(clamped.date, date(2025, 4, 30));
    assert!(clamped.was_clamped);
}

#[test]
fn clamp_day_zero_moves_up_to_first() {
    let clamped = clamp_day_of_month(date(2025, 2, 14), 0);
    assert_eq!(clamped.date, date(2025, 2, 1));
    assert!(clamped.was_clamped);
}

// ---------------------------------------------------------------------------
// weekday_index / ISO parsing
// ---------------------------------------------------------------------------

#[test]
fn weekday_index_starts_at_sunday() {
    assert_eq!(weekday_index(date(2025, 1, 12)), 0); // Sunday
    assert_eq!(weekday_index(date(2025, 1, 14)), 2); // Tuesday
    assert_eq!(weekday_index(date(2025, 1, 15)), 3); // Wednesday
    assert_eq!(weekday_index(date(2025, 1, 18)), 6); // Saturday
}

#[test]
fn parse_iso_date_is_a_plain_calendar_date() {
    assert_eq!(parse_iso_date("2025-01-10").unwrap(), date(2025, 1, 10));
    assert_eq!(parse_iso_date("2024-02-29").unwrap(), date(2024, 2, 29));
}

#[test]
fn parse_iso_date_rejects_impossible_dates() {
    assert!(matches!(
        parse_iso_date("2025-02-30"),
        Err(EngineError::InvalidDate(_))
    ));
    assert!(matches!(
        parse_iso_date("not-a-date"),
        Err(EngineError::InvalidDate(_))
    ));
}

#[test]
fn format_iso_date_pads_month_and_day() {
    assert_eq!(format_iso_date(date(2025, 3, 5)), "2025-03-05");
    assert_eq!(format_iso_date(date(2025, 12, 31)), "2025-12-31");
}
