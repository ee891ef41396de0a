//! Next-due-date evaluation for each rule variant.
//!
//! The engine is a pure function of `(rule, reference date)`: it keeps no state
//! between calls and returns the first due date on or after the reference date,
//! together with how much approximation went into it.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calendar::{self, ClampedDay};
use crate::error::{EngineError, Result};
use crate::rule::{FixedDayRule, RangeDayRule, RangeRule, Rule, RuleKind};

/// The rule maps directly onto the returned date.
pub const EXACT: f64 = 1.0;
/// A card due date was rolled forward to the preferred weekday.
pub const WEEKDAY_ADJUSTED: f64 = 0.9;
/// A card closing day did not exist in the month and was clamped.
pub const CLAMPED: f64 = 0.8;
/// A day range was reduced to its first day.
pub const RANGE_APPROXIMATION: f64 = 0.6;

/// Outcome of a single engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub calculated_date: NaiveDate,
    /// Clamping, range reduction, or a weekday roll was involved.
    pub is_estimated: bool,
    /// 1.0, 0.9, 0.8 or 0.6; lower means more approximation.
    pub confidence: f64,
}

/// Compute the next due date on or after `reference`.
///
/// # Errors
/// Returns `EngineError::NotYetSupported` for installment rules, which have no
/// evaluation branch, and `EngineError::DateOutOfRange` when the next cycle
/// would fall past [`NaiveDate::MAX`].
pub fn next_due_date(rule: &Rule, reference: NaiveDate) -> Result<CalculationResult> {
    debug!(kind = %rule.kind(), %reference, "computing next due date");

    let result = match rule {
        Rule::FixedDay(fixed) => fixed_day(fixed, reference)?,
        Rule::RangeDay(range_day) => range_day_rule(range_day, reference)?,
        Rule::Range(range) => range_rule(range, reference)?,
        Rule::Installment(_) => {
            return Err(EngineError::NotYetSupported(RuleKind::Installment));
        }
    };

    trace!(
        calculated = %result.calculated_date,
        estimated = result.is_estimated,
        confidence = result.confidence,
        "next due date computed"
    );
    Ok(result)
}

/// Like [`next_due_date`], but for a reference carrying a time-of-day, which is
/// dropped before any comparison.
pub fn next_due_date_at(rule: &Rule, reference: NaiveDateTime) -> Result<CalculationResult> {
    next_due_date(rule, calendar::start_of_day(reference))
}

fn following_month(reference: NaiveDate) -> Result<NaiveDate> {
    calendar::next_month_start(reference).ok_or(EngineError::DateOutOfRange(reference))
}

/// `day` in the reference month, or in the following month if that already passed.
fn next_day_of_month(reference: NaiveDate, day: u32) -> Result<ClampedDay> {
    let current = calendar::clamp_day_of_month(reference, day);
    if current.date < reference {
        Ok(calendar::clamp_day_of_month(following_month(reference)?, day))
    } else {
        Ok(current)
    }
}

fn fixed_day(rule: &FixedDayRule, reference: NaiveDate) -> Result<CalculationResult> {
    let due = next_day_of_month(reference, rule.day_of_month)?;
    Ok(CalculationResult {
        calculated_date: due.date,
        is_estimated: due.was_clamped,
        confidence: EXACT,
    })
}

fn range_day_rule(rule: &RangeDayRule, reference: NaiveDate) -> Result<CalculationResult> {
    let due = next_day_of_month(reference, rule.from_day)?;
    Ok(CalculationResult {
        calculated_date: due.date,
        is_estimated: true,
        confidence: RANGE_APPROXIMATION,
    })
}

fn range_rule(rule: &RangeRule, reference: NaiveDate) -> Result<CalculationResult> {
    let day = reference.day();
    let month_anchor = calendar::start_of_month(reference);

    let closing = if day < rule.closing_range_start {
        calendar::clamp_day_of_month(month_anchor, rule.closing_range_start)
    } else if day <= rule.closing_range_end {
        // Inside the closing window: the statement closes on the reference day.
        ClampedDay {
            date: reference,
            was_clamped: false,
        }
    } else {
        calendar::clamp_day_of_month(following_month(reference)?, rule.closing_range_start)
    };

    let mut due_date = calendar::add_days(closing.date, i64::from(rule.due_offset_days));
    let mut weekday_adjusted = false;

    if let Some(preferred) = rule.preferred_weekday {
        let roll_forward = (preferred % 7 + 7 - calendar::weekday_index(due_date)) % 7;
        if roll_forward > 0 {
            due_date = calendar::add_days(due_date, i64::from(roll_forward));
            weekday_adjusted = true;
        }
    }

    debug!(
        closing = %closing.date,
        clamped = closing.was_clamped,
        weekday_adjusted,
        "range rule closing resolved"
    );

    // Clamping outranks the weekday roll.
    let confidence = if closing.was_clamped {
        CLAMPED
    } else if weekday_adjusted {
        WEEKDAY_ADJUSTED
    } else {
        EXACT
    };

    Ok(CalculationResult {
        calculated_date: due_date,
        is_estimated: closing.was_clamped || weekday_adjusted,
        confidence,
    })
}
