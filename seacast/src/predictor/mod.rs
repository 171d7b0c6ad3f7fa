//! Prediction orchestrator - the public entry point of the
//! forecasting core.
//!
//! Wires the pipeline top-down: raw request → trajectory window →
//! the three forecast strategies → ensemble combination → structured
//! report. The contract is total: every input yields either a
//! [`PredictionReport`] or a typed [`PredictError`], never a panic.
//! Strategy-level failures are absorbed into per-method failure
//! markers in the report; only fatal conditions (malformed input,
//! invalid record, insufficient data, all methods failed) surface
//! as `Err`.
//!
//! Nothing is retried: the computation is pure and deterministic, so
//! retrying without new data cannot change the outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forecast::{
    ensemble, linear, polynomial, weighted, EnsembleForecast, ForecastError, StrategyError,
    StrategyForecast,
};
use crate::window::{RawPositionRecord, TrajectoryWindow, WindowError};

/// Vessel identity as supplied by the ingestion collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipInfo {
    /// Maritime Mobile Service Identity of the vessel.
    #[serde(rename = "MMSI")]
    pub mmsi: String,
}

/// A prediction request: vessel identity plus an unordered list of
/// raw position records.
///
/// Deserializes from the ingestion collaborator's JSON shape
/// (`ship_info.MMSI`, `positions[]`).
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    /// Vessel identity.
    pub ship_info: ShipInfo,

    /// Raw position records, in no particular order.
    #[serde(default)]
    pub positions: Vec<RawPositionRecord>,
}

impl PredictionRequest {
    /// Build a request directly (for callers that are not decoding
    /// the collaborator's JSON).
    pub fn new(mmsi: impl Into<String>, positions: Vec<RawPositionRecord>) -> Self {
        Self {
            ship_info: ShipInfo { mmsi: mmsi.into() },
            positions,
        }
    }
}

/// Per-method entry in the report: either a forecast or a failure
/// marker with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodOutcome {
    /// The strategy produced a forecast.
    Forecast(StrategyForecast),
    /// The strategy failed and was excluded from the ensemble.
    Failed { error: String },
}

impl MethodOutcome {
    fn from_result(result: Result<StrategyForecast, StrategyError>) -> Self {
        match result {
            Ok(forecast) => Self::Forecast(forecast),
            Err(error) => Self::Failed {
                error: error.to_string(),
            },
        }
    }
}

/// Results of every forecast method, keyed by method name in the
/// serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct MethodReports {
    pub linear: MethodOutcome,
    pub polynomial: MethodOutcome,
    pub weighted_velocity: MethodOutcome,
    pub ensemble: EnsembleForecast,
}

/// The externally visible result of a successful prediction request.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    /// Always true; the failure shape is [`FailureReport`].
    pub success: bool,

    /// When this report was generated.
    pub generated_at: DateTime<Utc>,

    /// MMSI of the vessel the forecast is for.
    pub mmsi: String,

    /// Number of position samples actually used (after windowing).
    pub samples_used: usize,

    /// Per-method forecasts plus the ensemble.
    pub predictions: MethodReports,
}

/// The externally visible result of a failed prediction request.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    /// Always false.
    pub success: bool,

    /// Human-readable failure reason.
    pub error: String,
}

impl From<&PredictError> for FailureReport {
    fn from(error: &PredictError) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Fatal errors of the prediction pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    /// The request is missing vessel identity or position records.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Window construction failed (invalid record or too few samples).
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Every forecast strategy failed.
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Run the full prediction pipeline for one request.
///
/// # Errors
///
/// - [`PredictError::MalformedInput`] for a blank MMSI or an empty
///   position list.
/// - [`PredictError::Window`] when records are invalid or fewer than
///   2 are usable.
/// - [`PredictError::Forecast`] when every strategy failed.
pub fn predict(request: &PredictionRequest) -> Result<PredictionReport, PredictError> {
    let mmsi = request.ship_info.mmsi.trim();
    if mmsi.is_empty() {
        return Err(PredictError::MalformedInput(
            "missing vessel MMSI".to_string(),
        ));
    }
    if request.positions.is_empty() {
        return Err(PredictError::MalformedInput(
            "no position records supplied".to_string(),
        ));
    }

    tracing::debug!(
        mmsi,
        records = request.positions.len(),
        "building trajectory window"
    );
    let window = TrajectoryWindow::from_records(&request.positions)?;

    let linear_result = linear::forecast(&window);
    let polynomial_result = polynomial::forecast(&window);
    let weighted_result = weighted::forecast(&window);

    let ensemble_forecast = ensemble::combine([
        linear_result.clone(),
        polynomial_result.clone(),
        weighted_result.clone(),
    ])?;

    let report = PredictionReport {
        success: true,
        generated_at: Utc::now(),
        mmsi: mmsi.to_string(),
        samples_used: window.len(),
        predictions: MethodReports {
            linear: MethodOutcome::from_result(linear_result),
            polynomial: MethodOutcome::from_result(polynomial_result),
            weighted_velocity: MethodOutcome::from_result(weighted_result),
            ensemble: ensemble_forecast,
        },
    };

    tracing::info!(
        mmsi = %report.mmsi,
        samples_used = report.samples_used,
        "prediction report generated"
    );

    Ok(report)
}
