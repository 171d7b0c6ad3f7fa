//! Ensemble combiner - averages the surviving forecast strategies.
//!
//! Runs linear, polynomial, and weighted-velocity forecasts against
//! the same window, excludes strategies that failed, and averages the
//! survivors' latitude, longitude, and confidence per horizon. Only
//! when every strategy fails does the combiner itself fail with
//! [`ForecastError::AllMethodsFailed`].

use crate::window::TrajectoryWindow;

use super::types::{
    EnsembleForecast, ForecastMethod, HorizonPrediction, StrategyForecast, HORIZONS_HOURS,
};
use super::{linear, polynomial, weighted, ForecastError, StrategyError};

/// Run all three strategies and combine the survivors.
pub fn forecast(window: &TrajectoryWindow) -> Result<EnsembleForecast, ForecastError> {
    combine([
        linear::forecast(window),
        polynomial::forecast(window),
        weighted::forecast(window),
    ])
}

/// Combine already-computed strategy results into an ensemble.
///
/// Failed strategies are logged and excluded. For each horizon, the
/// ensemble prediction is the arithmetic mean of latitude, longitude,
/// and confidence over the strategies that produced that horizon - a
/// strategy contributes to a horizon only if it has a value for it,
/// so partial horizon coverage degrades gracefully instead of
/// skewing the average.
///
/// # Errors
///
/// [`ForecastError::AllMethodsFailed`] when no strategy survived.
pub fn combine<const N: usize>(
    results: [Result<StrategyForecast, StrategyError>; N],
) -> Result<EnsembleForecast, ForecastError> {
    let mut surviving = Vec::with_capacity(N);
    for result in results {
        match result {
            Ok(strategy_forecast) => surviving.push(strategy_forecast),
            Err(error) => {
                tracing::warn!(%error, "strategy failed, excluding from ensemble");
            }
        }
    }

    if surviving.is_empty() {
        return Err(ForecastError::AllMethodsFailed);
    }

    let mut predictions = Vec::with_capacity(HORIZONS_HOURS.len());
    for &horizon in &HORIZONS_HOURS {
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        let mut confidence_sum = 0.0;
        let mut count = 0usize;

        for strategy_forecast in &surviving {
            if let Some(prediction) = strategy_forecast.at_horizon(horizon) {
                lat_sum += prediction.latitude;
                lon_sum += prediction.longitude;
                confidence_sum += prediction.confidence;
                count += 1;
            }
        }

        if count > 0 {
            let n = count as f64;
            predictions.push(HorizonPrediction {
                horizon_hours: horizon,
                latitude: lat_sum / n,
                longitude: lon_sum / n,
                confidence: confidence_sum / n,
            });
        }
    }

    Ok(EnsembleForecast {
        method: ForecastMethod::Ensemble,
        individual_methods: surviving,
        predictions,
    })
}
