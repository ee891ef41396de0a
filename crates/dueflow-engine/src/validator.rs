//! Structural and range validation for untrusted rule payloads.
//!
//! Validation runs before a payload is handed to the engine. It never fails:
//! every input, however malformed, produces a [`ValidationResult`]. Within the
//! branch for a rule type all checks run, so one call reports every problem.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::rule::RuleKind;

const DAY_MIN: i32 = 1;
const DAY_MAX: i32 = 31;
const WEEKDAY_MIN: i32 = 0;
const WEEKDAY_MAX: i32 = 6;

const NOT_AN_OBJECT: &str = "rule must be an object";
const UNSUPPORTED_TYPE: &str = "Unsupported or missing rule type (use RANGE, FIXED_DAY, or RANGE_DAY)";

/// Outcome of [`validate_rule`]. `errors` is empty iff `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    fn single(error: &str) -> Self {
        Self::from_errors(vec![error.to_string()])
    }
}

/// Validate an untrusted rule payload.
///
/// Dispatches on the `type` field. `INSTALLMENT` is reported as unsupported,
/// matching the engine.
pub fn validate_rule(candidate: &Value) -> ValidationResult {
    let Some(fields) = candidate.as_object() else {
        return ValidationResult::single(NOT_AN_OBJECT);
    };

    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|tag| tag.parse::<RuleKind>().ok());

    let errors = match kind {
        Some(RuleKind::Range) => range_errors(fields),
        Some(RuleKind::FixedDay) => fixed_day_errors(fields),
        Some(RuleKind::RangeDay) => range_day_errors(fields),
        Some(RuleKind::Installment) | None => {
            return ValidationResult::single(UNSUPPORTED_TYPE);
        }
    };

    debug!(kind = ?kind, errors = errors.len(), "rule validated");
    ValidationResult::from_errors(errors)
}

/// Field checks for a `RANGE` payload; the `type` field is not inspected.
pub fn validate_range_rule(candidate: &Value) -> Vec<String> {
    candidate
        .as_object()
        .map_or_else(|| vec![NOT_AN_OBJECT.to_string()], range_errors)
}

/// Field checks for a `FIXED_DAY` payload; the `type` field is not inspected.
pub fn validate_fixed_day_rule(candidate: &Value) -> Vec<String> {
    candidate
        .as_object()
        .map_or_else(|| vec![NOT_AN_OBJECT.to_string()], fixed_day_errors)
}

/// Field checks for a `RANGE_DAY` payload; the `type` field is not inspected.
pub fn validate_range_day_rule(candidate: &Value) -> Vec<String> {
    candidate
        .as_object()
        .map_or_else(|| vec![NOT_AN_OBJECT.to_string()], range_day_errors)
}

fn range_errors(fields: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    let start = check_bounded(fields, "closingRangeStart", DAY_MIN, DAY_MAX, &mut errors);
    let end = check_bounded(fields, "closingRangeEnd", DAY_MIN, DAY_MAX, &mut errors);
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.push(
                "closingRangeStart must be less than or equal to closingRangeEnd".to_string(),
            );
        }
    }

    match finite(fields, "dueOffsetDays") {
        None => errors.push("dueOffsetDays must be a number".to_string()),
        Some(offset) if offset < 0.0 => errors.push("dueOffsetDays must be >= 0".to_string()),
        Some(_) => {}
    }

    if fields.get("preferredWeekday").is_some_and(|v| !v.is_null()) {
        check_bounded(fields, "preferredWeekday", WEEKDAY_MIN, WEEKDAY_MAX, &mut errors);
    }

    errors
}

fn fixed_day_errors(fields: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();
    check_bounded(fields, "dayOfMonth", DAY_MIN, DAY_MAX, &mut errors);
    errors
}

fn range_day_errors(fields: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    let from = check_bounded(fields, "fromDay", DAY_MIN, DAY_MAX, &mut errors);
    let to = check_bounded(fields, "toDay", DAY_MIN, DAY_MAX, &mut errors);
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            errors.push("fromDay must be less than or equal to toDay".to_string());
        }
    }

    errors
}

/// The field as a finite number, or `None` for missing, non-numeric or non-finite values.
fn finite(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    fields
        .get(name)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// Push a message if the field is not a number in `[min, max]`.
///
/// Returns the value whenever it is numeric, in bounds or not.
fn check_bounded(
    fields: &Map<String, Value>,
    name: &str,
    min: i32,
    max: i32,
    errors: &mut Vec<String>,
) -> Option<f64> {
    match finite(fields, name) {
        None => {
            errors.push(format!("{} must be a number", name));
            None
        }
        Some(n) if n < f64::from(min) || n > f64::from(max) => {
            errors.push(format!("{} must be between {} and {}", name, min, max));
            Some(n)
        }
        Some(n) => Some(n),
    }
}
