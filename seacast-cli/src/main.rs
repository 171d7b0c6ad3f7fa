//! SeaCast CLI - run vessel trajectory forecasts from a JSON request.
//!
//! Reads a prediction request (ship identity plus recent AIS position
//! fixes) from a file, runs the forecasting pipeline, and prints the
//! JSON report to stdout. Failures are printed to stdout as a JSON
//! failure report (`{"success": false, ...}`) with exit code 1, so a
//! consuming process always receives structured output. Logging goes
//! to stderr and is controlled via `RUST_LOG`.

mod error;

use clap::Parser;
use seacast::predictor::{self, FailureReport, PredictionRequest};
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

use error::CliError;

#[derive(Parser)]
#[command(name = "seacast")]
#[command(version = seacast::VERSION)]
#[command(about = "Forecast vessel positions from recent AIS history", long_about = None)]
struct Args {
    /// Path to the JSON prediction request (ship_info + positions)
    input: String,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let raw = match fs::read_to_string(&args.input) {
        Ok(raw) => raw,
        Err(error) => CliError::InputRead {
            path: args.input.clone(),
            error,
        }
        .exit(),
    };

    let request: PredictionRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(error) => CliError::InputParse(error).exit(),
    };

    match predictor::predict(&request) {
        Ok(report) => {
            println!("{}", render(&report, args.pretty));
        }
        Err(error) => {
            tracing::warn!(%error, "prediction failed");
            let failure = FailureReport::from(&error);
            println!("{}", render(&failure, args.pretty));
            process::exit(1);
        }
    }
}

/// Serialize a report, compact or pretty.
fn render<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match result {
        Ok(json) => json,
        Err(error) => CliError::Render(error).exit(),
    }
}

/// Initialize stderr logging controlled by `RUST_LOG`.
///
/// Stdout is reserved for the JSON report, so all diagnostics go to
/// stderr. Defaults to `warn` when `RUST_LOG` is unset.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
