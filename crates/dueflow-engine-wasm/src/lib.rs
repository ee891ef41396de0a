//! WASM bindings for dueflow-engine.
//!
//! Exposes next-due-date calculation, schedule preview, card simulation, and
//! rule validation to JavaScript via `wasm-bindgen`. Rules are passed as JSON
//! strings in their wire format and dates as `YYYY-MM-DD` strings; results come
//! back as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p dueflow-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/dueflow_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use dueflow_engine::{RangeRule, Rule};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct PreviewDto<T> {
    results: Vec<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateCardDto {
    card_rule: RangeRule,
    results: Vec<dueflow_engine::CardCycle>,
}

// ---------------------------------------------------------------------------
// Helpers: parse inputs, map errors to JsValue
// ---------------------------------------------------------------------------

fn parse_rule_json(json: &str) -> Result<Rule, String> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| format!("Invalid rule JSON: {}", e))?;
    Rule::from_value(&value).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    dueflow_engine::parse_iso_date(s).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn calculate_json(rule_json: &str, reference_date: &str) -> Result<String, String> {
    let rule = parse_rule_json(rule_json)?;
    let reference = parse_date(reference_date)?;
    let result = dueflow_engine::next_due_date(&rule, reference).map_err(|e| e.to_string())?;
    to_json(&result)
}

fn preview_json(rule_json: &str, from: &str, months: u32) -> Result<String, String> {
    let rule = parse_rule_json(rule_json)?;
    let from = parse_date(from)?;
    let results =
        dueflow_engine::preview(&rule, from, months as usize).map_err(|e| e.to_string())?;
    to_json(&PreviewDto { results })
}

fn simulate_card_json(card_json: &str, from: &str, months: u32) -> Result<String, String> {
    let card: RangeRule =
        serde_json::from_str(card_json).map_err(|e| format!("Invalid card JSON: {}", e))?;
    let from = parse_date(from)?;
    let results = dueflow_engine::simulate_card(&card, from, months as usize)
        .map_err(|e| e.to_string())?;
    to_json(&SimulateCardDto {
        card_rule: card,
        results,
    })
}

fn validate_json(rule_json: &str) -> Result<String, String> {
    // Unparseable JSON is validated as a non-object rather than thrown.
    let candidate: Value = serde_json::from_str(rule_json).unwrap_or(Value::Null);
    to_json(&dueflow_engine::validate_rule(&candidate))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the next due date for a rule.
///
/// Returns `{calculatedDate, isEstimated, confidence}` as a JSON string.
///
/// # Arguments
/// - `rule_json` -- Rule in wire format (e.g., `{"type":"FIXED_DAY","dayOfMonth":20}`)
/// - `reference_date` -- `YYYY-MM-DD`, interpreted as a plain calendar date
#[wasm_bindgen(js_name = "calculateNextDueDate")]
pub fn calculate_next_due_date(rule_json: &str, reference_date: &str) -> Result<String, JsValue> {
    calculate_json(rule_json, reference_date).map_err(|e| JsValue::from_str(&e))
}

/// Compute `months` successive due dates starting at `from`.
///
/// Returns `{results: [...]}` as a JSON string.
#[wasm_bindgen(js_name = "previewDueDates")]
pub fn preview_due_dates(rule_json: &str, from: &str, months: u32) -> Result<String, JsValue> {
    preview_json(rule_json, from, months).map_err(|e| JsValue::from_str(&e))
}

/// Simulate `months` card cycles.
///
/// `card_json` carries `closingRangeStart`, `closingRangeEnd`, `dueOffsetDays` and
/// optionally `preferredWeekday`. Returns `{cardRule, results}` as a JSON string.
#[wasm_bindgen(js_name = "simulateCard")]
pub fn simulate_card(card_json: &str, from: &str, months: u32) -> Result<String, JsValue> {
    simulate_card_json(card_json, from, months).map_err(|e| JsValue::from_str(&e))
}

/// Validate a rule payload. Never throws for bad input; returns
/// `{valid, errors}` as a JSON string.
#[wasm_bindgen(js_name = "validateRule")]
pub fn validate_rule(rule_json: &str) -> Result<String, JsValue> {
    validate_json(rule_json).map_err(|e| JsValue::from_str(&e))
}
