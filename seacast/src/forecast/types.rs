//! Forecast result types shared by all strategies.

use serde::Serialize;
use std::fmt;

/// Forecast horizons in hours ahead of the most recent fix.
pub const HORIZONS_HOURS: [u32; 3] = [1, 3, 6];

/// Identifies which estimator produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Two-point linear extrapolation.
    Linear,
    /// Least-squares polynomial fit of lat(t) and lon(t).
    Polynomial,
    /// Recency-weighted velocity and bearing averaging.
    WeightedVelocity,
    /// Arithmetic mean of the surviving strategies.
    Ensemble,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Polynomial => write!(f, "polynomial"),
            Self::WeightedVelocity => write!(f, "weighted_velocity"),
            Self::Ensemble => write!(f, "ensemble"),
        }
    }
}

/// A forecast position at one horizon, with a confidence score.
///
/// Confidence is a decay-tuned value in [0, 1], strictly non-increasing
/// in horizon for every strategy. It is a relative ranking aid, not a
/// calibrated uncertainty estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizonPrediction {
    /// Hours ahead of the most recent fix (1, 3, or 6).
    pub horizon_hours: u32,

    /// Predicted latitude in degrees.
    pub latitude: f64,

    /// Predicted longitude in degrees.
    pub longitude: f64,

    /// Confidence score in [0, 1].
    pub confidence: f64,
}

/// Aggregate speed and bearing derived from pairwise motion analysis.
///
/// Ephemeral - produced and consumed within a single strategy
/// invocation, never shared across requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEstimate {
    /// Speed over ground in meters per second (>= 0).
    pub speed_mps: f64,

    /// Direction of movement in degrees (0-360).
    pub bearing_deg: f64,
}

/// Method-specific diagnostic fields attached to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodDiagnostics {
    /// Aggregate motion used by the linear and weighted estimators.
    Motion {
        /// Derived speed in m/s.
        speed_mps: f64,
        /// Derived bearing in degrees.
        bearing_deg: f64,
    },
    /// Fitted coefficients from the polynomial estimator,
    /// highest degree first.
    Polynomial {
        lat_coefficients: Vec<f64>,
        lon_coefficients: Vec<f64>,
    },
}

/// The output of one forecast strategy: three horizon predictions in
/// ascending horizon order plus method diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyForecast {
    /// The estimator that actually produced these predictions. When a
    /// strategy falls back to linear extrapolation, this reports
    /// [`ForecastMethod::Linear`].
    pub method: ForecastMethod,

    /// Method-specific diagnostics.
    #[serde(flatten)]
    pub diagnostics: MethodDiagnostics,

    /// Predictions for horizons 1, 3, and 6 hours, ascending.
    pub predictions: Vec<HorizonPrediction>,
}

impl StrategyForecast {
    /// The prediction at a given horizon, if present.
    pub fn at_horizon(&self, horizon_hours: u32) -> Option<&HorizonPrediction> {
        self.predictions
            .iter()
            .find(|p| p.horizon_hours == horizon_hours)
    }
}

/// The combined ensemble estimate plus the surviving individual
/// strategy forecasts it was averaged from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleForecast {
    /// Always [`ForecastMethod::Ensemble`].
    pub method: ForecastMethod,

    /// The strategy forecasts that survived and contributed.
    pub individual_methods: Vec<StrategyForecast>,

    /// Per-horizon arithmetic mean of the surviving forecasts.
    pub predictions: Vec<HorizonPrediction>,
}
