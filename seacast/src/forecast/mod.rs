//! Forecast strategies and ensemble combination.
//!
//! Three independent estimators turn a [`TrajectoryWindow`] into
//! position forecasts at +1 h, +3 h, and +6 h:
//!
//! - [`linear`] - two-point extrapolation, the baseline every other
//!   strategy falls back to.
//! - [`polynomial`] - least-squares fit of lat(t) and lon(t) over up
//!   to 5 recent samples.
//! - [`weighted`] - recency-weighted velocity/bearing averaging over
//!   up to 3 consecutive sample pairs.
//!
//! [`ensemble`] runs all three, discards failures, and averages the
//! survivors per horizon. Strategies never mutate the window and never
//! share state; each invocation produces a fresh
//! [`StrategyForecast`].

pub mod ensemble;
pub mod linear;
pub mod polynomial;
pub mod weighted;

mod error;
mod types;

pub use error::{ForecastError, StrategyError};
pub use types::{
    EnsembleForecast, ForecastMethod, HorizonPrediction, MethodDiagnostics, MotionEstimate,
    StrategyForecast, HORIZONS_HOURS,
};

use crate::geodesic::project_position;

/// Project a motion estimate forward from an origin at every horizon.
///
/// Shared by the linear and weighted estimators: each horizon's
/// position is the origin projected `speed * horizon` along the
/// estimate's bearing, with confidence `max(base - decay * h, floor)`.
pub(crate) fn project_horizons(
    origin: (f64, f64),
    estimate: &MotionEstimate,
    base_confidence: f64,
    confidence_decay: f64,
    confidence_floor: f64,
) -> Vec<HorizonPrediction> {
    HORIZONS_HOURS
        .iter()
        .map(|&horizon| {
            let distance_ahead = estimate.speed_mps * f64::from(horizon) * 3600.0;
            let (latitude, longitude) =
                project_position(origin, estimate.bearing_deg, distance_ahead);
            HorizonPrediction {
                horizon_hours: horizon,
                latitude,
                longitude,
                confidence: (base_confidence - confidence_decay * f64::from(horizon))
                    .max(confidence_floor),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_horizons_covers_all_horizons_ascending() {
        let estimate = MotionEstimate {
            speed_mps: 10.0,
            bearing_deg: 0.0,
        };
        let predictions = project_horizons((0.0, 0.0), &estimate, 0.9, 0.1, 0.3);

        let horizons: Vec<u32> = predictions.iter().map(|p| p.horizon_hours).collect();
        assert_eq!(horizons, vec![1, 3, 6]);
    }

    #[test]
    fn test_project_horizons_confidence_floor() {
        let estimate = MotionEstimate {
            speed_mps: 0.0,
            bearing_deg: 0.0,
        };
        let predictions = project_horizons((0.0, 0.0), &estimate, 0.9, 0.1, 0.3);

        assert!((predictions[0].confidence - 0.8).abs() < 1e-9);
        assert!((predictions[1].confidence - 0.6).abs() < 1e-9);
        // 0.9 - 0.6 = 0.3, exactly at the floor
        assert!((predictions[2].confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_project_horizons_zero_speed_stays_put() {
        let estimate = MotionEstimate {
            speed_mps: 0.0,
            bearing_deg: 123.0,
        };
        let predictions = project_horizons((43.3, 5.37), &estimate, 0.9, 0.1, 0.3);

        for p in &predictions {
            assert!((p.latitude - 43.3).abs() < 1e-9);
            assert!((p.longitude - 5.37).abs() < 1e-9);
        }
    }
}
