//! Seasonal period selection, decomposition and Holt-Winters forecasting

use crate::decomposition::decompose_additive;
use crate::error::{ForecastError, Result};
use crate::models::holt_winters::HoltWinters;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::series::RegularSeries;
use crate::utils::future_months;
use chrono::NaiveDate;
use serde::Serialize;

/// Fewest monthly observations that can be forecast
pub const MIN_OBSERVATIONS: usize = 4;

/// History length from which a full annual cycle is used
pub const ANNUAL_THRESHOLD: usize = 24;

/// Observed months re-predicted at the start of the forecast window
pub const OVERLAP_MONTHS: usize = 2;

/// Months forecast past the last observation
pub const HORIZON_MONTHS: usize = 3;

/// A predicted score for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_score: f64,
}

/// Historical series with its forecast window
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub historical: RegularSeries,
    pub forecast: Vec<ForecastPoint>,
}

/// Seasonal period for a series of `observations` months
///
/// Half the history below two years, a full annual cycle from two years on.
pub fn seasonal_period(observations: usize) -> Result<usize> {
    match observations {
        n if n < MIN_OBSERVATIONS => Err(ForecastError::InsufficientHistory {
            required: MIN_OBSERVATIONS,
            actual: n,
        }),
        n if n < ANNUAL_THRESHOLD => Ok(n / 2),
        _ => Ok(12),
    }
}

/// Picks a period, decomposes the series and forecasts with Holt-Winters
#[derive(Debug, Default, Clone, Copy)]
pub struct SeasonalForecaster;

impl SeasonalForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Forecast the window starting at the second-to-last observed month and
    /// ending three months after the last one.
    pub fn forecast(&self, series: &RegularSeries) -> Result<ForecastResult> {
        let n = series.len();
        let period = seasonal_period(n)?;
        let values = series.values();

        let decomposition = decompose_additive(&values, period)?;
        tracing::debug!(
            period,
            seasonal = ?decomposition.seasonal_indices(),
            strength = ?decomposition.seasonal_strength(),
            "Seasonal decomposition"
        );

        let trained = HoltWinters::new(period)?.train(series)?;

        let start = n - OVERLAP_MONTHS;
        let end = n - 1 + HORIZON_MONTHS;
        let predicted = trained.predict(start, end)?;

        let dates = series.dates();
        let mut window_dates: Vec<NaiveDate> = dates[start..].to_vec();
        window_dates.extend(future_months(series.last_date(), HORIZON_MONTHS)?);

        if predicted.len() != window_dates.len() {
            return Err(ForecastError::ForecastingError(format!(
                "Prediction window has {} values for {} months",
                predicted.len(),
                window_dates.len()
            )));
        }

        let forecast: Vec<ForecastPoint> = window_dates
            .into_iter()
            .zip(predicted)
            .map(|(date, predicted_score)| ForecastPoint {
                date,
                predicted_score,
            })
            .collect();

        debug_assert_eq!(forecast[0].date, dates[n - 2]);

        tracing::debug!(
            model = trained.name(),
            points = forecast.len(),
            "Forecast window produced"
        );

        Ok(ForecastResult {
            historical: series.clone(),
            forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_needs_four_observations() {
        let err = seasonal_period(3).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientHistory {
                required: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn short_series_fail_before_decomposition() {
        let series =
            RegularSeries::from_values(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &[1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            SeasonalForecaster::new().forecast(&series),
            Err(ForecastError::InsufficientHistory { .. })
        ));
    }
}
