//! Error types for dueflow-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::rule::RuleKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The rule tag is unknown, missing, or its required fields are absent or mistyped.
    #[error("Unsupported rule type: {0} (only FIXED_DAY, RANGE_DAY, and RANGE are implemented)")]
    UnsupportedRuleType(String),

    /// The rule variant is part of the data model but has no evaluation branch yet.
    #[error("Rule type {0} is not yet supported by the engine")]
    NotYetSupported(RuleKind),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The next cycle would fall past the last representable calendar date.
    #[error("Date out of range: no month follows {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Too many cycles requested: {requested} (at most {max})")]
    CountTooLarge { requested: usize, max: usize },
}

impl EngineError {
    /// True for both unknown tags and declared-but-unevaluated variants.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            EngineError::UnsupportedRuleType(_) | EngineError::NotYetSupported(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
