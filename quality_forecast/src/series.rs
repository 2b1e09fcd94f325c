//! Regular monthly series built from irregular raw records

use crate::data::RawRecord;
use crate::error::{ForecastError, Result};
use crate::utils::{from_month_ordinal, month_ordinal, month_start};
use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// One month of a regular series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// First day of the month
    pub date: NaiveDate,
    /// Mean (or interpolated) score for the month
    pub score: f64,
}

/// Contiguous monthly series with no missing scores
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSeries {
    points: Vec<MonthlyPoint>,
}

impl RegularSeries {
    /// Create a series from points, checking the monthly invariants
    pub fn from_points(points: Vec<MonthlyPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ForecastError::InsufficientData(
                "A monthly series needs at least one point".to_string(),
            ));
        }

        for window in points.windows(2) {
            if month_ordinal(window[1].date) - month_ordinal(window[0].date) != 1 {
                return Err(ForecastError::DataError(format!(
                    "Months must be contiguous: {} is followed by {}",
                    window[0].date, window[1].date
                )));
            }
        }

        if let Some(bad) = points.iter().find(|p| !p.score.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Score for {} is not finite",
                bad.date
            )));
        }

        Ok(Self { points })
    }

    /// Build a series of consecutive months starting at `start`
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Result<Self> {
        let first = month_ordinal(start);
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                Ok(MonthlyPoint {
                    date: from_month_ordinal(first + i as i32)?,
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_points(points)
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scores in month order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.score).collect()
    }

    /// Month starts in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Most recent month
    pub fn last_date(&self) -> NaiveDate {
        // from_points rejects empty series
        self.points[self.points.len() - 1].date
    }
}

/// Turns raw records into a gap-free monthly series
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Average records per month, reindex onto the full month range and
    /// linearly interpolate interior gaps.
    pub fn build(records: &[RawRecord]) -> Result<RegularSeries> {
        let mut buckets: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
        for record in records.iter().filter(|r| r.score.is_finite()) {
            buckets
                .entry(month_ordinal(month_start(record.creation_date)))
                .or_default()
                .push(record.score);
        }

        let known: BTreeMap<i32, f64> = buckets
            .into_iter()
            .map(|(month, scores)| (month, scores.iter().mean()))
            .collect();

        let (first, last) = match (known.keys().next(), known.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Err(ForecastError::InsufficientData(
                    "No records with a usable score".to_string(),
                ))
            }
        };

        let mut points = Vec::with_capacity((last - first + 1) as usize);
        let mut interpolated = 0usize;
        for month in first..=last {
            let score = match known.get(&month) {
                Some(&score) => score,
                None => {
                    interpolated += 1;
                    interpolate(&known, month)?
                }
            };
            points.push(MonthlyPoint {
                date: from_month_ordinal(month)?,
                score,
            });
        }

        tracing::debug!(
            records = records.len(),
            months = points.len(),
            interpolated,
            "Built monthly series"
        );

        RegularSeries::from_points(points)
    }
}

/// Linear interpolation on month ordinals between the nearest known neighbours
fn interpolate(known: &BTreeMap<i32, f64>, month: i32) -> Result<f64> {
    let before = known.range(..month).next_back();
    let after = known.range(month + 1..).next();

    match (before, after) {
        (Some((&m0, &v0)), Some((&m1, &v1))) => {
            let fraction = f64::from(month - m0) / f64::from(m1 - m0);
            Ok(v0 + (v1 - v0) * fraction)
        }
        _ => Err(ForecastError::DataError(format!(
            "Month ordinal {} lies outside the known range",
            month
        ))),
    }
}
