//! Aligns per-category forecasts onto the general series's date axis

use crate::data::Category;
use crate::forecaster::ForecastResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How month dates are rendered as report labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabeling {
    /// Month name only, e.g. `March`. Same-named months of different years share a label.
    #[default]
    Month,
    /// Month name and year, e.g. `March 2024`
    YearMonth,
}

impl DateLabeling {
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            DateLabeling::Month => date.format("%B").to_string(),
            DateLabeling::YearMonth => date.format("%B %Y").to_string(),
        }
    }
}

/// A forecast tagged with the category it was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    pub category: Category,
    pub result: ForecastResult,
}

impl CategoryResult {
    pub fn new(category: Category, result: ForecastResult) -> Self {
        Self { category, result }
    }
}

/// Field name holding a category's observed score
pub fn real_score_field(category: Category) -> String {
    format!("realScore{}", category.name())
}

/// Field name holding a category's Holt-Winters score
pub fn forecast_score_field(category: Category) -> String {
    format!("HWScore{}", category.name())
}

/// One date of the combined report
///
/// Categories without a value for the date have no field at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedEntry {
    pub date: String,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

/// Per-date category scores in general-series order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CombinedReport {
    entries: Vec<CombinedEntry>,
}

impl CombinedReport {
    pub fn entries(&self) -> &[CombinedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score stored under `field` for the entry labelled `date`
    pub fn get(&self, date: &str, field: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .and_then(|e| e.scores.get(field).copied())
    }
}

/// Merges category forecasts by date label
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryAligner {
    labeling: DateLabeling,
}

impl CategoryAligner {
    pub fn new(labeling: DateLabeling) -> Self {
        Self { labeling }
    }

    pub fn labeling(&self) -> DateLabeling {
        self.labeling
    }

    /// Build one entry per general historical month, filled with every
    /// category's observed and forecast score carrying the same label.
    ///
    /// When several points of a category share a label, the later one wins.
    pub fn align(&self, general: &ForecastResult, categorized: &[CategoryResult]) -> CombinedReport {
        let labelled: Vec<(Category, Vec<(String, f64)>, Vec<(String, f64)>)> = categorized
            .iter()
            .map(|c| {
                let real = c
                    .result
                    .historical
                    .points()
                    .iter()
                    .map(|p| (self.labeling.label(p.date), p.score))
                    .collect();
                let predicted = c
                    .result
                    .forecast
                    .iter()
                    .map(|p| (self.labeling.label(p.date), p.predicted_score))
                    .collect();
                (c.category, real, predicted)
            })
            .collect();

        let entries = general
            .historical
            .points()
            .iter()
            .map(|point| {
                let date = self.labeling.label(point.date);
                let mut scores = BTreeMap::new();

                for (category, real, predicted) in &labelled {
                    for (_, score) in real.iter().filter(|(label, _)| *label == date) {
                        scores.insert(real_score_field(*category), *score);
                    }
                    for (_, score) in predicted.iter().filter(|(label, _)| *label == date) {
                        scores.insert(forecast_score_field(*category), *score);
                    }
                }

                CombinedEntry { date, scores }
            })
            .collect();

        CombinedReport { entries }
    }
}
