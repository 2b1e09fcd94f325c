//! Forecasting models for monthly series

use crate::error::{ForecastError, Result};
use crate::series::RegularSeries;
use std::fmt::Debug;

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Forecast `horizons` steps past the end of the training sample
    fn forecast(&self, horizons: usize) -> Result<Vec<f64>>;

    /// One-step-ahead fitted values over the training sample
    fn fitted_values(&self) -> &[f64];

    /// Predictions for sample positions `start..=end`
    ///
    /// Positions inside the training sample return fitted values; positions
    /// past its end return out-of-sample forecasts.
    fn predict(&self, start: usize, end: usize) -> Result<Vec<f64>> {
        if start > end {
            return Err(ForecastError::InvalidParameter(format!(
                "Prediction start ({}) is after end ({})",
                start, end
            )));
        }

        let fitted = self.fitted_values();
        let n = fitted.len();
        let ahead = if end >= n {
            self.forecast(end + 1 - n)?
        } else {
            Vec::new()
        };

        Ok((start..=end)
            .map(|i| if i < n { fitted[i] } else { ahead[i - n] })
            .collect())
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a monthly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a regular series
    fn train(&self, series: &RegularSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod holt_winters;
pub mod optimize;
