//! `dueflow` CLI — validate rules and compute due dates from the command line.
//!
//! Every subcommand reads a JSON request and writes a JSON response.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a rule (exit code 1 when invalid)
//! echo '{"rule":{"type":"FIXED_DAY","dayOfMonth":15}}' | dueflow validate
//!
//! # Next due date on or after a reference date
//! echo '{"rule":{"type":"FIXED_DAY","dayOfMonth":20},"referenceDate":"2025-01-10"}' \
//!   | dueflow calculate
//!
//! # Next three due dates
//! dueflow preview -i request.json -o schedule.json
//!
//! # Closing/due pairs for a credit card
//! echo '{"closingRangeStart":5,"closingRangeEnd":11,"dueOffsetDays":8,"from":"2025-01-01","months":3}' \
//!   | dueflow simulate-card
//!
//! # Debug logging on stderr
//! RUST_LOG=dueflow_engine=debug dueflow calculate -i request.json
//! ```

mod request;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dueflow_engine::{CalculationResult, Rule};
use serde::Serialize;
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

use request::{CalculateRequest, PreviewRequest, SimulateCardRequest, ValidateRequest};

#[derive(Parser)]
#[command(
    name = "dueflow",
    version,
    about = "Next due dates for bills, card cycles, and installments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rule: {"rule": {...}}
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Next due date: {"rule": {...}, "referenceDate": "YYYY-MM-DD"}
    Calculate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Successive due dates: {"rule": {...}, "from": "YYYY-MM-DD", "months": n}
    Preview {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Card closing/due pairs: {closingRangeStart, closingRangeEnd, dueOffsetDays, preferredWeekday?, from, months}
    SimulateCard {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Serialize)]
struct ValidationFailure<'a> {
    valid: bool,
    errors: &'a [String],
}

#[derive(Serialize)]
struct ValidationSuccess {
    valid: bool,
}

#[derive(Serialize)]
struct PreviewResponse {
    results: Vec<CalculationResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateCardResponse {
    card_rule: dueflow_engine::RangeRule,
    results: Vec<dueflow_engine::CardCycle>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { input, output } => {
            let request: ValidateRequest = read_request(input.as_deref())?;
            let result = dueflow_engine::validate_rule(&request.rule);
            tracing::info!(valid = result.valid, errors = result.errors.len(), "validated rule");

            if result.valid {
                write_json(output.as_deref(), &ValidationSuccess { valid: true })?;
            } else {
                write_json(
                    output.as_deref(),
                    &ValidationFailure {
                        valid: false,
                        errors: &result.errors,
                    },
                )?;
                process::exit(1);
            }
        }
        Commands::Calculate { input, output } => {
            let request: CalculateRequest = read_request(input.as_deref())?;
            let rule = decode_rule(&request.rule)?;
            let reference = dueflow_engine::parse_iso_date(&request.reference_date)
                .context("Invalid referenceDate")?;

            let result = dueflow_engine::next_due_date(&rule, reference)
                .context("Failed to calculate next due date")?;
            write_json(output.as_deref(), &result)?;
        }
        Commands::Preview { input, output } => {
            let request: PreviewRequest = read_request(input.as_deref())?;
            let rule = decode_rule(&request.rule)?;
            let from = dueflow_engine::parse_iso_date(&request.from).context("Invalid from date")?;

            let results = dueflow_engine::preview(&rule, from, request.months)
                .context("Failed to preview due dates")?;
            write_json(output.as_deref(), &PreviewResponse { results })?;
        }
        Commands::SimulateCard { input, output } => {
            let request: SimulateCardRequest = read_request(input.as_deref())?;
            let from = dueflow_engine::parse_iso_date(&request.from).context("Invalid from date")?;

            let results = dueflow_engine::simulate_card(&request.card, from, request.months)
                .context("Failed to simulate card cycles")?;
            write_json(
                output.as_deref(),
                &SimulateCardResponse {
                    card_rule: request.card,
                    results,
                },
            )?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "dueflow=debug,dueflow_engine=debug"
    } else {
        "dueflow=warn,dueflow_engine=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn decode_rule(value: &serde_json::Value) -> Result<Rule> {
    Rule::from_value(value).context("Failed to decode rule")
}

fn read_request<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Invalid request JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
