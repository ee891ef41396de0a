//! JSON request bodies accepted by the subcommands.
//!
//! Rules are kept as raw JSON here: `validate` must see whatever the caller
//! sent, and the other subcommands decode through `Rule::from_value` so an
//! unknown tag surfaces as the engine's unsupported-rule error.

use dueflow_engine::RangeRule;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub rule: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub rule: Value,
    pub reference_date: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub rule: Value,
    pub from: String,
    pub months: usize,
}

#[derive(Debug, Deserialize)]
pub struct SimulateCardRequest {
    #[serde(flatten)]
    pub card: RangeRule,
    pub from: String,
    pub months: usize,
}
