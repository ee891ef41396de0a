//! # dueflow-engine
//!
//! Next-due-date computation for recurring financial obligations: monthly bills,
//! credit card closing/due cycles, and installments.
//!
//! A [`Rule`] describes when something falls due; [`next_due_date`] turns a rule
//! and a reference date into the next due date, flagging results that needed
//! approximation (a day clamped to a short month, a day range reduced to one day,
//! a weekday roll) and scoring how directly the rule maps onto the date.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dueflow_engine::{next_due_date, FixedDayRule, Rule};
//!
//! let rule = Rule::FixedDay(FixedDayRule { day_of_month: 31 });
//! let reference = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
//! let result = next_due_date(&rule, reference).unwrap();
//!
//! assert_eq!(result.calculated_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
//! assert!(result.is_estimated);
//! assert_eq!(result.confidence, 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — local-date arithmetic and the shared day clamp
//! - [`rule`] — rule variants and their wire format
//! - [`engine`] — next due date per rule variant
//! - [`validator`] — multi-error validation of untrusted rule payloads
//! - [`schedule`] — successive due dates and card cycle simulation
//! - [`error`] — Error types

pub mod calendar;
pub mod engine;
pub mod error;
pub mod rule;
pub mod schedule;
pub mod validator;

pub use calendar::{format_iso_date, parse_iso_date, ClampedDay};
pub use engine::{next_due_date, next_due_date_at, CalculationResult};
pub use error::EngineError;
pub use rule::{FixedDayRule, InstallmentRule, RangeDayRule, RangeRule, Rule, RuleKind};
pub use schedule::{preview, simulate_card, CardCycle, MAX_CYCLES};
pub use validator::{validate_rule, ValidationResult};
