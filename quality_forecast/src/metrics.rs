//! In-sample accuracy of fitted models

use crate::error::{ForecastError, Result};
use statrs::statistics::Statistics;

/// Fit accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct FitAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actuals
    pub mape: Option<f64>,
}

/// Compare fitted values against the observed series
pub fn fit_accuracy(fitted: &[f64], actual: &[f64]) -> Result<FitAccuracy> {
    if fitted.len() != actual.len() || fitted.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Fitted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let errors: Vec<f64> = actual.iter().zip(fitted.iter()).map(|(a, f)| a - f).collect();

    let mae = errors.iter().map(|e| e.abs()).mean();
    let mse = errors.iter().map(|e| e * e).mean();

    let percentages: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, e)| e.abs() / a.abs() * 100.0)
        .collect();
    let mape = if percentages.is_empty() {
        None
    } else {
        Some(percentages.mean())
    };

    Ok(FitAccuracy {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
    })
}

impl std::fmt::Display for FitAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAE {:.4}, RMSE {:.4}", self.mae, self.rmse)?;
        if let Some(mape) = self.mape {
            write!(f, ", MAPE {:.2}%", mape)?;
        }
        Ok(())
    }
}
