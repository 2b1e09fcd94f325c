//! Classical additive seasonal decomposition

use crate::error::{ForecastError, Result};
use statrs::statistics::Statistics;

/// Trend, seasonal and residual components of a series
///
/// Trend and residual are `None` at the edges where the centred moving
/// average has no full window.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub period: usize,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

impl Decomposition {
    /// The `period` seasonal indices, summing to zero
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal[..self.period]
    }

    /// Share of the detrended variance explained by the seasonal component
    pub fn seasonal_strength(&self) -> Option<f64> {
        let (resid, detrended): (Vec<f64>, Vec<f64>) = self
            .residual
            .iter()
            .zip(self.seasonal.iter())
            .filter_map(|(r, s)| r.map(|r| (r, r + s)))
            .unzip();

        if detrended.len() < 2 {
            return None;
        }

        let detrended_var = detrended.variance();
        if detrended_var <= f64::EPSILON {
            return None;
        }
        Some((1.0 - resid.variance() / detrended_var).max(0.0))
    }
}

/// Centred moving-average filter weights for `period`
///
/// Odd periods use `period` equal weights; even periods use a 2xMA over
/// `period + 1` points with half weights at both ends.
fn trend_filter(period: usize) -> Vec<f64> {
    let p = period as f64;
    if period % 2 == 0 {
        let mut weights = vec![1.0 / p; period + 1];
        weights[0] = 0.5 / p;
        weights[period] = 0.5 / p;
        weights
    } else {
        vec![1.0 / p; period]
    }
}

/// Perform additive decomposition: `value = trend + seasonal + residual`
pub fn decompose_additive(data: &[f64], period: usize) -> Result<Decomposition> {
    let n = data.len();
    if period < 2 {
        return Err(ForecastError::DecompositionError(format!(
            "Seasonal period must be at least 2, got {}",
            period
        )));
    }
    if n < 2 * period {
        return Err(ForecastError::DecompositionError(format!(
            "Need two complete cycles ({} observations) for period {}, got {}",
            2 * period,
            period,
            n
        )));
    }

    let filter = trend_filter(period);
    let half = filter.len() / 2;

    let mut trend = vec![None; n];
    for (i, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &data[i - half..i - half + filter.len()];
        *slot = Some(window.iter().zip(filter.iter()).map(|(x, w)| x * w).sum());
    }

    let detrended: Vec<Option<f64>> = data
        .iter()
        .zip(trend.iter())
        .map(|(x, t)| t.map(|t| x - t))
        .collect();

    let mut averages = Vec::with_capacity(period);
    for pos in 0..period {
        let values: Vec<f64> = detrended
            .iter()
            .skip(pos)
            .step_by(period)
            .filter_map(|v| *v)
            .collect();
        if values.is_empty() {
            return Err(ForecastError::DecompositionError(format!(
                "Seasonal position {} has no detrended observations",
                pos
            )));
        }
        averages.push(values.iter().mean());
    }

    let centre = averages.iter().mean();
    let indices: Vec<f64> = averages.iter().map(|a| a - centre).collect();
    let seasonal: Vec<f64> = (0..n).map(|i| indices[i % period]).collect();

    let residual = data
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((x, t), s)| t.map(|t| x - t - s))
        .collect();

    Ok(Decomposition {
        period,
        trend,
        seasonal,
        residual,
    })
}
