//! Successive due dates for a rule, built by stepping the engine forward.
//!
//! Each step feeds the previous due date plus one day back in as the next
//! reference date, so a run of `count` steps yields `count` consecutive cycles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::engine::{self, CalculationResult};
use crate::error::{EngineError, Result};
use crate::rule::{RangeRule, Rule};

/// Upper bound on `count` for [`preview`] and [`simulate_card`]: a century of
/// monthly cycles.
pub const MAX_CYCLES: usize = 1200;

/// One simulated credit card cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCycle {
    /// Due date minus the offset. After a weekday roll this is later than the
    /// day the statement actually closed.
    pub closing_date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_estimated: bool,
    pub confidence: f64,
}

/// The next `count` due dates for `rule`, starting at `from`.
///
/// # Errors
/// Returns `EngineError::CountTooLarge` when `count` exceeds [`MAX_CYCLES`].
/// Otherwise fails with the engine's error on the first step that cannot be
/// evaluated; no partial list is returned.
pub fn preview(rule: &Rule, from: NaiveDate, count: usize) -> Result<Vec<CalculationResult>> {
    if count > MAX_CYCLES {
        return Err(EngineError::CountTooLarge {
            requested: count,
            max: MAX_CYCLES,
        });
    }

    let mut results = Vec::with_capacity(count);
    let mut reference = from;

    for _ in 0..count {
        let result = engine::next_due_date(rule, reference)?;
        reference = calendar::add_days(result.calculated_date, 1);
        results.push(result);
    }

    Ok(results)
}

/// Simulate `count` billing cycles of a credit card described by `card`.
pub fn simulate_card(card: &RangeRule, from: NaiveDate, count: usize) -> Result<Vec<CardCycle>> {
    let offset = i64::from(card.due_offset_days);
    let cycles = preview(&Rule::Range(*card), from, count)?
        .into_iter()
        .map(|result| CardCycle {
            closing_date: calendar::add_days(result.calculated_date, -offset),
            due_date: result.calculated_date,
            is_estimated: result.is_estimated,
            confidence: result.confidence,
        })
        .collect();

    Ok(cycles)
}
