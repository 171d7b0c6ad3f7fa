//! Polynomial regression forecast strategy.
//!
//! Fits latitude and longitude independently as polynomials of elapsed
//! time over up to 5 recent fixes, then evaluates both curves at the
//! forecast horizons. Captures curvature (turning, accelerating
//! tracks) that the two-point linear baseline cannot.
//!
//! Falls back to linear extrapolation when fewer than 3 samples are
//! available or when the least-squares system cannot be solved.

use nalgebra::{DMatrix, DVector};

use crate::window::TrajectoryWindow;

use super::types::{
    ForecastMethod, HorizonPrediction, MethodDiagnostics, StrategyForecast, HORIZONS_HOURS,
};
use super::{linear, StrategyError};

/// Confidence model: max(0.85 - 0.08 * h, 0.4).
const BASE_CONFIDENCE: f64 = 0.85;
const CONFIDENCE_DECAY: f64 = 0.08;
const CONFIDENCE_FLOOR: f64 = 0.4;

/// Maximum number of recent samples used for the fit.
const MAX_FIT_SAMPLES: usize = 5;

/// Minimum samples required before delegating to linear.
const MIN_FIT_SAMPLES: usize = 3;

/// Singular-value cutoff for the SVD solve.
const SVD_EPSILON: f64 = 1e-12;

/// Forecast by least-squares polynomial regression.
///
/// Uses a degree-`min(2, n - 1)` fit over the `n <= 5` most recent
/// samples. Delegates wholesale to [`linear::forecast`] when fewer
/// than 3 samples exist or the fit is numerically singular, so the
/// returned forecast's `method` field reports which estimator actually
/// ran.
pub fn forecast(window: &TrajectoryWindow) -> Result<StrategyForecast, StrategyError> {
    if window.len() < MIN_FIT_SAMPLES {
        tracing::debug!(
            samples = window.len(),
            "too few samples for polynomial fit, delegating to linear"
        );
        return linear::forecast(window);
    }

    let subset = &window.samples()[..window.len().min(MAX_FIT_SAMPLES)];

    // Elapsed hours since the oldest sample of the subset, so the time
    // axis is non-negative and increasing toward the present.
    let oldest_ts = subset[subset.len() - 1].timestamp;
    let times: Vec<f64> = subset
        .iter()
        .map(|s| (s.timestamp - oldest_ts).num_milliseconds() as f64 / 3_600_000.0)
        .collect();
    let lats: Vec<f64> = subset.iter().map(|s| s.latitude).collect();
    let lons: Vec<f64> = subset.iter().map(|s| s.longitude).collect();

    let degree = 2.min(subset.len() - 1);

    let (lat_coefficients, lon_coefficients) =
        match (polyfit(&times, &lats, degree), polyfit(&times, &lons, degree)) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!(%error, "polynomial fit failed, delegating to linear");
                return linear::forecast(window);
            }
        };

    // Horizons are measured from the most recent sample, which sits at
    // times[0] on the fitted axis.
    let now_offset = times[0];
    let predictions: Vec<HorizonPrediction> = HORIZONS_HOURS
        .iter()
        .map(|&horizon| HorizonPrediction {
            horizon_hours: horizon,
            latitude: polyval(&lat_coefficients, now_offset + f64::from(horizon)),
            longitude: polyval(&lon_coefficients, now_offset + f64::from(horizon)),
            confidence: (BASE_CONFIDENCE - CONFIDENCE_DECAY * f64::from(horizon))
                .max(CONFIDENCE_FLOOR),
        })
        .collect();

    if predictions
        .iter()
        .any(|p| !p.latitude.is_finite() || !p.longitude.is_finite())
    {
        tracing::warn!("polynomial evaluation produced non-finite values, delegating to linear");
        return linear::forecast(window);
    }

    Ok(StrategyForecast {
        method: ForecastMethod::Polynomial,
        diagnostics: MethodDiagnostics::Polynomial {
            lat_coefficients,
            lon_coefficients,
        },
        predictions,
    })
}

/// Least-squares fit of `ys` as a degree-`degree` polynomial of `ts`.
///
/// Solves the Vandermonde system via SVD. Coefficients are returned
/// highest degree first, so `polyval` can evaluate them by Horner's
/// rule.
fn polyfit(ts: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>, StrategyError> {
    let rows = ts.len();
    let cols = degree + 1;

    let vandermonde = DMatrix::from_fn(rows, cols, |r, c| ts[r].powi((degree - c) as i32));
    let rhs = DVector::from_column_slice(ys);

    let solution = vandermonde
        .svd(true, true)
        .solve(&rhs, SVD_EPSILON)
        .map_err(|e| StrategyError::FitFailed(e.to_string()))?;

    let coefficients: Vec<f64> = solution.iter().copied().collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(StrategyError::FitFailed(
            "non-finite coefficients".to_string(),
        ));
    }
    Ok(coefficients)
}

/// Evaluate a polynomial with highest-degree-first coefficients.
fn polyval(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * t + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RawPositionRecord;

    fn record(timestamp: &str, lat: f64, lon: f64) -> RawPositionRecord {
        RawPositionRecord {
            timestamp: timestamp.to_string(),
            latitude: lat.into(),
            longitude: lon.into(),
            sog: None,
            cog: None,
            heading: None,
        }
    }

    #[test]
    fn test_polyval_horner() {
        // 2t^2 + 3t + 1 at t = 2 is 15
        assert!((polyval(&[2.0, 3.0, 1.0], 2.0) - 15.0).abs() < 1e-12);
        // Constant polynomial
        assert!((polyval(&[7.0], 100.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_polyfit_recovers_exact_quadratic() {
        let ts = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = ts.iter().map(|t| 0.5 * t * t - 2.0 * t + 3.0).collect();

        let coeffs = polyfit(&ts, &ys, 2).unwrap();
        assert!((coeffs[0] - 0.5).abs() < 1e-9, "a: {}", coeffs[0]);
        assert!((coeffs[1] + 2.0).abs() < 1e-9, "b: {}", coeffs[1]);
        assert!((coeffs[2] - 3.0).abs() < 1e-9, "c: {}", coeffs[2]);
    }

    #[test]
    fn test_two_samples_delegate_to_linear() {
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 0.0, 0.0),
            record("2024-05-01T13:00:00Z", 0.0, 1.0),
        ])
        .unwrap();

        let poly = forecast(&window).unwrap();
        let lin = linear::forecast(&window).unwrap();

        assert_eq!(poly.method, ForecastMethod::Linear);
        assert_eq!(poly.predictions, lin.predictions, "fallback law");
    }

    #[test]
    fn test_straight_track_matches_linear_closely() {
        // Constant-velocity due-east track: the quadratic fit should
        // collapse to the same straight line the linear strategy uses
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T10:00:00Z", 0.0, 0.0),
            record("2024-05-01T11:00:00Z", 0.0, 1.0),
            record("2024-05-01T12:00:00Z", 0.0, 2.0),
        ])
        .unwrap();

        let poly = forecast(&window).unwrap();
        assert_eq!(poly.method, ForecastMethod::Polynomial);

        let p6h = poly.at_horizon(6).unwrap();
        assert!(
            (p6h.longitude - 8.0).abs() < 0.01,
            "6h on a 1°/h track should be ~8°E, got {}",
            p6h.longitude
        );
        assert!(p6h.latitude.abs() < 0.01);
    }

    #[test]
    fn test_accelerating_track_diverges_from_linear() {
        // Longitude grows quadratically: 0, 0.5, 2.0 over two hours.
        // The polynomial continues the acceleration; linear only sees
        // the last two points.
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T10:00:00Z", 0.0, 0.0),
            record("2024-05-01T11:00:00Z", 0.0, 0.5),
            record("2024-05-01T12:00:00Z", 0.0, 2.0),
        ])
        .unwrap();

        let poly = forecast(&window).unwrap();
        let lin = linear::forecast(&window).unwrap();

        assert_eq!(poly.method, ForecastMethod::Polynomial);
        let poly_6h = poly.at_horizon(6).unwrap().longitude;
        let lin_6h = lin.at_horizon(6).unwrap().longitude;
        assert!(
            (poly_6h - lin_6h).abs() > 1.0,
            "accelerating track: polynomial ({}) should diverge from linear ({}) at 6h",
            poly_6h,
            lin_6h
        );
    }

    #[test]
    fn test_confidence_constants() {
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T10:00:00Z", 0.0, 0.0),
            record("2024-05-01T11:00:00Z", 0.0, 1.0),
            record("2024-05-01T12:00:00Z", 0.0, 2.0),
        ])
        .unwrap();

        let poly = forecast(&window).unwrap();
        assert!((poly.at_horizon(1).unwrap().confidence - 0.77).abs() < 1e-9);
        assert!((poly.at_horizon(3).unwrap().confidence - 0.61).abs() < 1e-9);
        // 0.85 - 0.48 = 0.37, below the 0.4 floor
        assert!((poly.at_horizon(6).unwrap().confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_identical_timestamps_still_forecast() {
        // Degenerate time axis: every sample at t = 0. The fit is
        // singular (or collapses), so the strategy must fall back to
        // linear rather than failing the request.
        let window = TrajectoryWindow::from_records(&[
            record("2024-05-01T12:00:00Z", 43.3, 5.37),
            record("2024-05-01T12:00:00Z", 43.3, 5.38),
            record("2024-05-01T12:00:00Z", 43.3, 5.39),
        ])
        .unwrap();

        let result = forecast(&window).unwrap();
        assert_eq!(result.predictions.len(), 3);
        for p in &result.predictions {
            assert!(p.latitude.is_finite() && p.longitude.is_finite());
        }
    }

    #[test]
    fn test_uses_at_most_five_samples() {
        // Two old off-track fixes followed by five fixes on an exact
        // 1°/h line. Only the five newest may enter the fit, so the
        // forecast must continue the clean line; fitting all seven
        // would bend it toward the outliers.
        let mut records = vec![
            record("2024-05-01T06:00:00Z", 0.0, 5.0),
            record("2024-05-01T07:00:00Z", 0.0, 5.0),
        ];
        records.extend(
            (0..5).map(|i| record(&format!("2024-05-01T{:02}:00:00Z", 8 + i), 0.0, i as f64)),
        );
        let window = TrajectoryWindow::from_records(&records).unwrap();

        let poly = forecast(&window).unwrap();
        let p1h = poly.at_horizon(1).unwrap();
        assert!(
            (p1h.longitude - 5.0).abs() < 0.01,
            "next hour on the 1°/h line should be ~5°E, got {}",
            p1h.longitude
        );
    }
}
