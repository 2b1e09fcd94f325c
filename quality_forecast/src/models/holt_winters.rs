//! Additive Holt-Winters exponential smoothing with estimated initial states

use crate::error::{ForecastError, Result};
use crate::metrics::{fit_accuracy, FitAccuracy};
use crate::models::optimize::NelderMead;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::series::RegularSeries;

/// Grid used to seed the smoothing parameters before the simplex search
const SEED_GRID: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// Smoothing parameters, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing
    pub gamma: f64,
}

/// Triple exponential smoothing with additive trend and additive seasonality
///
/// Smoothing parameters and the initial level, trend and seasonal states are
/// all estimated by minimising the in-sample sum of squared one-step errors.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Seasonal period length
    period: usize,
    /// Simplex settings for the estimation
    optimizer: NelderMead,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    name: String,
    period: usize,
    params: SmoothingParams,
    /// Level at the end of the sample
    level: f64,
    /// Trend at the end of the sample
    trend: f64,
    /// Last `period` seasonal states, oldest first
    seasonal: Vec<f64>,
    /// One-step-ahead fitted values
    fitted: Vec<f64>,
    /// Sum of squared one-step errors
    sse: f64,
    accuracy: FitAccuracy,
}

/// Output of one pass of the smoothing recursions
struct Filtered {
    fitted: Vec<f64>,
    level: f64,
    trend: f64,
    /// `season[t]` holds `s_{t - period}`, so the first `period` entries are the initial states
    season: Vec<f64>,
    sse: f64,
}

impl HoltWinters {
    /// Create a new Holt-Winters model for the given seasonal period
    pub fn new(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Holt-Winters (additive, period={})", period),
            period,
            optimizer: NelderMead::default(),
        })
    }

    /// Override the simplex settings used during estimation
    pub fn with_optimizer(mut self, optimizer: NelderMead) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Simple initial states: first-season mean level, season-over-season trend
    fn heuristic_states(&self, y: &[f64]) -> (f64, f64, Vec<f64>) {
        let p = self.period;
        let first_mean = y[..p].iter().sum::<f64>() / p as f64;
        let trend = if y.len() >= 2 * p {
            let second_mean = y[p..2 * p].iter().sum::<f64>() / p as f64;
            (second_mean - first_mean) / p as f64
        } else {
            0.0
        };
        let seasonal = y[..p].iter().map(|v| v - first_mean).collect();
        (first_mean, trend, seasonal)
    }

    /// Run the additive recursions for the given parameters and initial states
    fn filter(&self, y: &[f64], params: SmoothingParams, level0: f64, trend0: f64, seasonal0: &[f64]) -> Filtered {
        let p = self.period;
        let SmoothingParams { alpha, beta, gamma } = params;

        let mut season = Vec::with_capacity(y.len() + p);
        season.extend_from_slice(seasonal0);

        let mut level = level0;
        let mut trend = trend0;
        let mut fitted = Vec::with_capacity(y.len());
        let mut sse = 0.0;

        for (t, &value) in y.iter().enumerate() {
            let s_prev = season[t];
            let one_step = level + trend + s_prev;
            fitted.push(one_step);
            sse += (value - one_step).powi(2);

            let new_level = alpha * (value - s_prev) + (1.0 - alpha) * (level + trend);
            let new_trend = beta * (new_level - level) + (1.0 - beta) * trend;
            season.push(gamma * (value - level - trend) + (1.0 - gamma) * s_prev);

            level = new_level;
            trend = new_trend;
        }

        Filtered {
            fitted,
            level,
            trend,
            season,
            sse,
        }
    }

    /// Unpack an optimiser vector `[logit α, logit β, logit γ, l0, b0, s0..]`
    fn decode(x: &[f64]) -> (SmoothingParams, f64, f64, &[f64]) {
        let params = SmoothingParams {
            alpha: logistic(x[0]),
            beta: logistic(x[1]),
            gamma: logistic(x[2]),
        };
        (params, x[3], x[4], &x[5..])
    }

    /// Best smoothing parameters on a coarse grid, keeping heuristic states fixed
    fn grid_seed(&self, y: &[f64], level0: f64, trend0: f64, seasonal0: &[f64]) -> SmoothingParams {
        let mut best = SmoothingParams {
            alpha: 0.5,
            beta: 0.1,
            gamma: 0.1,
        };
        let mut best_sse = f64::INFINITY;

        for &alpha in &SEED_GRID {
            for &beta in &SEED_GRID {
                for &gamma in &SEED_GRID {
                    let params = SmoothingParams { alpha, beta, gamma };
                    let sse = self.filter(y, params, level0, trend0, seasonal0).sse;
                    if sse < best_sse {
                        best_sse = sse;
                        best = params;
                    }
                }
            }
        }

        best
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, series: &RegularSeries) -> Result<Self::Trained> {
        let y = series.values();
        if y.len() < self.period {
            return Err(ForecastError::ForecastingError(format!(
                "Need at least one full season ({} observations), got {}",
                self.period,
                y.len()
            )));
        }

        let (level0, trend0, seasonal0) = self.heuristic_states(&y);
        let seed = self.grid_seed(&y, level0, trend0, &seasonal0);

        let mut start = vec![logit(seed.alpha), logit(seed.beta), logit(seed.gamma), level0, trend0];
        start.extend_from_slice(&seasonal0);

        let scale = y.iter().map(|v| v.abs()).fold(0.0, f64::max).max(1.0);
        let mut steps = vec![0.5, 0.5, 0.5, 0.05 * scale, 0.01 * scale];
        steps.extend(std::iter::repeat(0.05 * scale).take(self.period));

        let minimum = self.optimizer.minimize(
            |x| {
                let (params, l0, b0, s0) = Self::decode(x);
                self.filter(&y, params, l0, b0, s0).sse
            },
            &start,
            &steps,
        );

        if !minimum.value.is_finite() {
            return Err(ForecastError::ForecastingError(
                "Parameter estimation did not reach a finite error".to_string(),
            ));
        }

        let (params, l0, b0, s0) = Self::decode(&minimum.point);
        let filtered = self.filter(&y, params, l0, b0, s0);
        if !filtered.level.is_finite() || !filtered.trend.is_finite() {
            return Err(ForecastError::ForecastingError(
                "Smoothed states are not finite".to_string(),
            ));
        }

        let accuracy = fit_accuracy(&filtered.fitted, &y)?;
        let n = y.len();

        tracing::debug!(
            model = %self.name,
            alpha = params.alpha,
            beta = params.beta,
            gamma = params.gamma,
            sse = filtered.sse,
            rmse = accuracy.rmse,
            iterations = minimum.iterations,
            "Estimated Holt-Winters parameters"
        );

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            period: self.period,
            params,
            level: filtered.level,
            trend: filtered.trend,
            seasonal: filtered.season[n..n + self.period].to_vec(),
            fitted: filtered.fitted,
            sse: filtered.sse,
            accuracy,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    pub fn params(&self) -> SmoothingParams {
        self.params
    }

    pub fn sse(&self) -> f64 {
        self.sse
    }

    pub fn accuracy(&self) -> &FitAccuracy {
        &self.accuracy
    }

    /// Final level, trend and seasonal states
    pub fn components(&self) -> (f64, f64, &[f64]) {
        (self.level, self.trend, &self.seasonal)
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizons: usize) -> Result<Vec<f64>> {
        let values: Vec<f64> = (1..=horizons)
            .map(|h| self.level + h as f64 * self.trend + self.seasonal[(h - 1) % self.period])
            .collect();

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ForecastingError(
                "Forecast produced non-finite values".to_string(),
            ));
        }

        Ok(values)
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn logistic(u: f64) -> f64 {
    1.0 / (1.0 + (-u).exp())
}

fn logit(p: f64) -> f64 {
    let p = p.clamp(1e-6, 1.0 - 1e-6);
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> RegularSeries {
        RegularSeries::from_values(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), values).unwrap()
    }

    #[test]
    fn rejects_degenerate_period() {
        assert!(HoltWinters::new(1).is_err());
        assert!(HoltWinters::new(2).is_ok());
    }

    #[test]
    fn flat_series_forecasts_flat() {
        let model = HoltWinters::new(3).unwrap();
        let trained = model.train(&series(&[3.0; 6])).unwrap();

        for value in trained.forecast(3).unwrap() {
            assert_abs_diff_eq!(value, 3.0, epsilon = 1e-6);
        }
        assert!(trained.sse() < 1e-9);
    }

    #[test]
    fn linear_trend_is_extrapolated() {
        let values: Vec<f64> = (0..12).map(|i| 10.0 + 2.0 * i as f64).collect();
        let trained = HoltWinters::new(4).unwrap().train(&series(&values)).unwrap();

        let ahead = trained.forecast(3).unwrap();
        assert_abs_diff_eq!(ahead[0], 34.0, epsilon = 1.0);
        assert_abs_diff_eq!(ahead[2], 38.0, epsilon = 1.0);
    }

    #[test]
    fn seasonal_pattern_repeats_in_forecast() {
        let pattern = [2.0, -1.0, 0.5, -1.5];
        let values: Vec<f64> = (0..16).map(|i| 50.0 + pattern[i % 4]).collect();
        let trained = HoltWinters::new(4).unwrap().train(&series(&values)).unwrap();

        let ahead = trained.forecast(4).unwrap();
        for (got, offset) in ahead.iter().zip(pattern.iter()) {
            assert_abs_diff_eq!(*got, 50.0 + offset, epsilon = 0.25);
        }
    }

    #[test]
    fn predict_spans_fitted_and_future_values() {
        let values = [4.0, 5.0, 4.5, 5.5, 4.8, 5.6];
        let trained = HoltWinters::new(3).unwrap().train(&series(&values)).unwrap();

        let window = trained.predict(4, 8).unwrap();
        let ahead = trained.forecast(3).unwrap();

        assert_eq!(window.len(), 5);
        assert_eq!(window[0], trained.fitted_values()[4]);
        assert_eq!(window[1], trained.fitted_values()[5]);
        assert_eq!(&window[2..], ahead.as_slice());
        assert!(trained.predict(5, 4).is_err());
    }

    #[test]
    fn estimated_parameters_stay_in_unit_interval() {
        let values = [3.2, 4.1, 3.9, 4.4, 3.7, 4.6, 4.2, 4.9, 4.0, 5.1];
        let trained = HoltWinters::new(5).unwrap().train(&series(&values)).unwrap();
        let params = trained.params();

        for p in [params.alpha, params.beta, params.gamma] {
            assert!((0.0..=1.0).contains(&p));
        }
        assert!(trained.accuracy().rmse >= 0.0);
    }
}
