//! Error types for the forecast module.

use thiserror::Error;

use super::types::ForecastMethod;

/// A single strategy could not produce a forecast.
///
/// Never fatal on its own: the ensemble combiner excludes failed
/// strategies and averages the survivors. Strategies also absorb their
/// own numerical failures (singular fits, degenerate pair geometry) by
/// falling back to linear extrapolation before ever surfacing one of
/// these.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StrategyError {
    /// The window holds fewer samples than the strategy needs.
    #[error("{method} needs {required} samples, window has {actual}")]
    NotEnoughSamples {
        method: ForecastMethod,
        required: usize,
        actual: usize,
    },

    /// The least-squares system could not be solved.
    #[error("least-squares fit failed: {0}")]
    FitFailed(String),
}

/// Fatal forecast failure surfaced to the orchestrator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ForecastError {
    /// Every strategy failed; there is nothing to average.
    #[error("all forecast strategies failed")]
    AllMethodsFailed,
}
