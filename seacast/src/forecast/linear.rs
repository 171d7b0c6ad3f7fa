//! Linear extrapolation - the baseline forecast strategy.
//!
//! Derives speed and bearing from the two most recent fixes and
//! projects the vessel along that great-circle track. Always available
//! when the window holds at least 2 samples, and the fallback target
//! for the polynomial and weighted strategies.

use crate::geodesic::{bearing_between, distance_m, MPS_PER_KNOT};
use crate::window::{PositionSample, TrajectoryWindow};

use super::types::{
    ForecastMethod, MethodDiagnostics, MotionEstimate, StrategyForecast,
};
use super::{project_horizons, StrategyError};

/// Confidence model: max(0.9 - 0.1 * h, 0.3).
const BASE_CONFIDENCE: f64 = 0.9;
const CONFIDENCE_DECAY: f64 = 0.1;
const CONFIDENCE_FLOOR: f64 = 0.3;

/// Substitute time delta for non-monotonic or duplicate timestamps.
const SUBSTITUTE_TIME_DIFF_S: f64 = 3600.0;

/// Forecast by linear extrapolation of the two most recent fixes.
///
/// # Errors
///
/// [`StrategyError::NotEnoughSamples`] if the window holds fewer than
/// 2 samples. A window built by
/// [`TrajectoryWindow::from_records`] always satisfies this.
pub fn forecast(window: &TrajectoryWindow) -> Result<StrategyForecast, StrategyError> {
    let samples = window.samples();
    if samples.len() < 2 {
        return Err(StrategyError::NotEnoughSamples {
            method: ForecastMethod::Linear,
            required: 2,
            actual: samples.len(),
        });
    }

    let latest = &samples[0];
    let previous = &samples[1];
    let estimate = recent_motion(previous, latest);

    let predictions = project_horizons(
        latest.coords(),
        &estimate,
        BASE_CONFIDENCE,
        CONFIDENCE_DECAY,
        CONFIDENCE_FLOOR,
    );

    Ok(StrategyForecast {
        method: ForecastMethod::Linear,
        diagnostics: MethodDiagnostics::Motion {
            speed_mps: estimate.speed_mps,
            bearing_deg: estimate.bearing_deg,
        },
        predictions,
    })
}

/// Derive speed and bearing from two consecutive fixes.
///
/// A non-positive time delta (duplicate or out-of-order timestamps)
/// does not fail the request: the delta is substituted with one hour
/// and the speed is taken from the latest fix's reported SOG instead
/// of the positional displacement.
fn recent_motion(previous: &PositionSample, latest: &PositionSample) -> MotionEstimate {
    let time_diff_s = (latest.timestamp - previous.timestamp).num_milliseconds() as f64 / 1000.0;
    let bearing_deg = bearing_between(previous.coords(), latest.coords());

    let speed_mps = if time_diff_s > 0.0 {
        distance_m(previous.coords(), latest.coords()) / time_diff_s
    } else {
        tracing::debug!(
            time_diff_s,
            substitute_s = SUBSTITUTE_TIME_DIFF_S,
            "non-positive time delta between fixes, deriving speed from SOG"
        );
        (latest.sog * MPS_PER_KNOT).max(0.0)
    };

    MotionEstimate {
        speed_mps,
        bearing_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RawPositionRecord;

    fn record(timestamp: &str, lat: f64, lon: f64, sog: Option<f64>) -> RawPositionRecord {
        RawPositionRecord {
            timestamp: timestamp.to_string(),
            latitude: lat.into(),
            longitude: lon.into(),
            sog: sog.map(Into::into),
            cog: None,
            heading: None,
        }
    }

    fn due_east_window() -> TrajectoryWindow {
        // Due-east motion at ~111 km/h (1 degree of longitude per hour
        // at the equator)
        TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 0.0, 0.0, None),
            record("2024-05-01T13:00:00Z", 0.0, 1.0, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_due_east_one_hour_prediction() {
        let forecast = forecast(&due_east_window()).unwrap();

        let p1h = forecast.at_horizon(1).unwrap();
        assert!(
            (p1h.longitude - 2.0).abs() < 0.01,
            "1h forecast should be ~2°E, got {}",
            p1h.longitude
        );
        assert!(
            p1h.latitude.abs() < 0.01,
            "1h forecast should stay on the equator, got {}",
            p1h.latitude
        );
        assert!((p1h.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_non_increasing_in_horizon() {
        let forecast = forecast(&due_east_window()).unwrap();

        let confidences: Vec<f64> = forecast.predictions.iter().map(|p| p.confidence).collect();
        assert!(confidences[0] >= confidences[1]);
        assert!(confidences[1] >= confidences[2]);
        assert!((confidences[2] - 0.3).abs() < 1e-9, "6h confidence hits the floor");
    }

    #[test]
    fn test_diagnostics_report_motion() {
        let result = forecast(&due_east_window()).unwrap();

        assert_eq!(result.method, ForecastMethod::Linear);
        match result.diagnostics {
            MethodDiagnostics::Motion {
                speed_mps,
                bearing_deg,
            } => {
                // ~111.2 km over 3600 s
                assert!((speed_mps - 30.9).abs() < 0.2, "speed {}", speed_mps);
                assert!((bearing_deg - 90.0).abs() < 0.5, "bearing {}", bearing_deg);
            }
            other => panic!("expected motion diagnostics, got {:?}", other),
        }
    }

    #[test]
    fn test_identical_timestamps_use_sog_speed() {
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 43.3, 5.37, Some(10.0)),
            record("2024-05-01T12:00:00Z", 43.3, 5.37, Some(10.0)),
        ])
        .unwrap();

        let result = forecast(&window).unwrap();
        match result.diagnostics {
            MethodDiagnostics::Motion { speed_mps, .. } => {
                assert!(
                    (speed_mps - 10.0 * MPS_PER_KNOT).abs() < 1e-9,
                    "speed should come from SOG, got {}",
                    speed_mps
                );
            }
            other => panic!("expected motion diagnostics, got {:?}", other),
        }
        assert_eq!(result.predictions.len(), 3);
    }

    #[test]
    fn test_out_of_order_delta_does_not_fail() {
        // Tie in timestamps with input order putting the geographically
        // later fix first: delta is zero, SOG absent, speed falls to 0
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 0.0, 1.0, None),
            record("2024-05-01T12:00:00Z", 0.0, 0.0, None),
        ])
        .unwrap();

        let result = forecast(&window).unwrap();
        for p in &result.predictions {
            assert!(p.latitude.is_finite() && p.longitude.is_finite());
        }
    }

    #[test]
    fn test_stationary_vessel_forecasts_current_position() {
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 43.3, 5.37, None),
            record("2024-05-01T11:00:00Z", 43.3, 5.37, None),
        ])
        .unwrap();

        let result = forecast(&window).unwrap();
        for p in &result.predictions {
            assert!((p.latitude - 43.3).abs() < 1e-9);
            assert!((p.longitude - 5.37).abs() < 1e-9);
        }
    }
}
