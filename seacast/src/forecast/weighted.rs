//! Recency-weighted velocity averaging forecast strategy.
//!
//! Smooths jitter in individual fixes by averaging per-pair speed and
//! bearing over up to 3 consecutive sample pairs, weighting recent
//! pairs higher, then projecting from the latest fix. Bearings are
//! combined by vector (sin/cos) composition rather than arithmetic
//! mean so tracks crossing north do not wrap around.
//!
//! Falls back to linear extrapolation when fewer than 3 samples are
//! available or no pair has a positive time delta.

use crate::geodesic::{bearing_between, distance_m, normalize_bearing};
use crate::window::TrajectoryWindow;

use super::types::{ForecastMethod, MethodDiagnostics, MotionEstimate, StrategyForecast};
use super::{linear, project_horizons, StrategyError};

/// Confidence model: max(0.88 - 0.09 * h, 0.35).
const BASE_CONFIDENCE: f64 = 0.88;
const CONFIDENCE_DECAY: f64 = 0.09;
const CONFIDENCE_FLOOR: f64 = 0.35;

/// Maximum number of consecutive sample pairs examined.
const MAX_VELOCITY_PAIRS: usize = 3;

/// Minimum samples required before delegating to linear.
const MIN_SAMPLES: usize = 3;

/// Forecast by recency-weighted velocity and bearing averaging.
///
/// Pair *i* (0-based, most recent first) joins samples `i` and `i+1`
/// and carries weight `1 / (i + 1)`; pairs with a non-positive time
/// delta are skipped. Delegates to [`linear::forecast`] when fewer
/// than 3 samples exist or every pair was skipped.
pub fn forecast(window: &TrajectoryWindow) -> Result<StrategyForecast, StrategyError> {
    if window.len() < MIN_SAMPLES {
        tracing::debug!(
            samples = window.len(),
            "too few samples for velocity averaging, delegating to linear"
        );
        return linear::forecast(window);
    }

    let estimate = match aggregate_motion(window) {
        Some(estimate) => estimate,
        None => {
            tracing::warn!("no sample pair with positive time delta, delegating to linear");
            return linear::forecast(window);
        }
    };

    let predictions = project_horizons(
        window.latest().coords(),
        &estimate,
        BASE_CONFIDENCE,
        CONFIDENCE_DECAY,
        CONFIDENCE_FLOOR,
    );

    Ok(StrategyForecast {
        method: ForecastMethod::WeightedVelocity,
        diagnostics: MethodDiagnostics::Motion {
            speed_mps: estimate.speed_mps,
            bearing_deg: estimate.bearing_deg,
        },
        predictions,
    })
}

/// Weighted-average motion over the most recent sample pairs.
///
/// Returns `None` when no pair has a positive time delta.
fn aggregate_motion(window: &TrajectoryWindow) -> Option<MotionEstimate> {
    let samples = window.samples();
    let pair_count = MAX_VELOCITY_PAIRS.min(samples.len() - 1);

    let mut total_weight = 0.0;
    let mut speed_sum = 0.0;
    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;

    for i in 0..pair_count {
        let newer = &samples[i];
        let older = &samples[i + 1];

        let time_diff_s = (newer.timestamp - older.timestamp).num_milliseconds() as f64 / 1000.0;
        if time_diff_s <= 0.0 {
            continue;
        }

        let speed_mps = distance_m(older.coords(), newer.coords()) / time_diff_s;
        let bearing_rad = bearing_between(older.coords(), newer.coords()).to_radians();
        let weight = 1.0 / (i + 1) as f64;

        total_weight += weight;
        speed_sum += speed_mps * weight;
        sin_sum += bearing_rad.sin() * weight;
        cos_sum += bearing_rad.cos() * weight;
    }

    if total_weight <= 0.0 {
        return None;
    }

    Some(MotionEstimate {
        speed_mps: speed_sum / total_weight,
        bearing_deg: normalize_bearing(sin_sum.atan2(cos_sum).to_degrees()),
    })
}
