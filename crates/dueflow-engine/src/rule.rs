//! Rule data model: the declarative description of when an obligation falls due.
//!
//! The serde representation is the wire format used by callers:
//!
//! ```json
//! { "type": "RANGE", "closingRangeStart": 10, "closingRangeEnd": 15,
//!   "dueOffsetDays": 2, "preferredWeekday": 3 }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};

/// Due on the same calendar day every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedDayRule {
    #[serde(deserialize_with = "whole_number")]
    pub day_of_month: u32,
}

/// Card-style cycle: the statement closes somewhere in
/// `[closing_range_start, closing_range_end]` and the payment is due
/// `due_offset_days` later, optionally pushed to a preferred weekday.
///
/// This is also the shape stored for a credit card, without the `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRule {
    #[serde(deserialize_with = "whole_number")]
    pub closing_range_start: u32,
    #[serde(deserialize_with = "whole_number")]
    pub closing_range_end: u32,
    #[serde(deserialize_with = "whole_number")]
    pub due_offset_days: u32,
    /// 0 = Sunday .. 6 = Saturday.
    #[serde(
        default,
        deserialize_with = "optional_whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_weekday: Option<u32>,
}

/// Due on the first valid day of `[from_day, to_day]` each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDayRule {
    #[serde(deserialize_with = "whole_number")]
    pub from_day: u32,
    #[serde(deserialize_with = "whole_number")]
    pub to_day: u32,
}

/// Monthly installments starting on `start_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRule {
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "whole_number")]
    pub total_installments: u32,
}

/// A recurrence rule. Exactly one variant applies per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    FixedDay(FixedDayRule),
    Range(RangeRule),
    RangeDay(RangeDayRule),
    Installment(InstallmentRule),
}

/// The bare discriminant of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    FixedDay,
    Range,
    RangeDay,
    Installment,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::FixedDay,
        RuleKind::Range,
        RuleKind::RangeDay,
        RuleKind::Installment,
    ];

    /// The wire tag (`"FIXED_DAY"`, `"RANGE"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::FixedDay => "FIXED_DAY",
            RuleKind::Range => "RANGE",
            RuleKind::RangeDay => "RANGE_DAY",
            RuleKind::Installment => "INSTALLMENT",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnsupportedRuleType(s.to_string()))
    }
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::FixedDay(_) => RuleKind::FixedDay,
            Rule::Range(_) => RuleKind::Range,
            Rule::RangeDay(_) => RuleKind::RangeDay,
            Rule::Installment(_) => RuleKind::Installment,
        }
    }

    /// Decode an untrusted JSON value into a rule.
    ///
    /// The tag is checked before any field is read, so a payload carrying one
    /// variant's tag and another variant's fields is rejected instead of being
    /// misread.
    ///
    /// # Errors
    /// Returns `EngineError::UnsupportedRuleType` when the tag is missing, not a
    /// string, unknown, or when the tagged variant's fields are absent or mistyped.
    pub fn from_value(value: &Value) -> Result<Rule> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| EngineError::UnsupportedRuleType("missing rule type".to_string()))?;
        let kind: RuleKind = tag.parse()?;

        Rule::deserialize(value)
            .map_err(|e| EngineError::UnsupportedRuleType(format!("{}: {}", kind, e)))
    }
}

/// JSON has a single number type, so `20` and `20.0` both decode to `20`.
/// Fractions, negatives and values past `u32::MAX` are rejected.
fn whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    as_whole_number(n)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {}", n)))
}

fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) => as_whole_number(n)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {}", n))),
    }
}

fn as_whole_number(n: f64) -> Option<u32> {
    let whole = n.is_finite() && n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n);
    whole.then_some(n as u32)
}

impl From<FixedDayRule> for Rule {
    fn from(rule: FixedDayRule) -> Self {
        Rule::FixedDay(rule)
    }
}

impl From<RangeRule> for Rule {
    fn from(rule: RangeRule) -> Self {
        Rule::Range(rule)
    }
}

impl From<RangeDayRule> for Rule {
    fn from(rule: RangeDayRule) -> Self {
        Rule::RangeDay(rule)
    }
}

impl From<InstallmentRule> for Rule {
    fn from(rule: InstallmentRule) -> Self {
        Rule::Installment(rule)
    }
}
