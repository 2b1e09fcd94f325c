#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use quality_forecast::{Category, RawRecord, RecordSource, Result, Scope};
use std::collections::HashMap;

/// One record per consecutive month, mid-month, starting at `year`/`month`
pub fn monthly_records(year: i32, month: u32, scores: &[f64]) -> Vec<RawRecord> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let date = start + chrono::Months::new(i as u32);
            RawRecord::new(
                Utc.with_ymd_and_hms(date.year(), date.month(), 15, 9, 30, 0).unwrap(),
                score,
            )
        })
        .collect()
}

/// A mildly seasonal, slowly rising score series
pub fn wavy_scores(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 3.5 + 0.02 * i as f64 + 0.4 * ((i as f64) * std::f64::consts::PI / 3.0).sin())
        .collect()
}

/// In-memory record source keyed by scope
#[derive(Debug, Default)]
pub struct MemorySource {
    pub general: Vec<RawRecord>,
    pub categories: HashMap<Category, Vec<RawRecord>>,
    pub unreachable: Vec<Category>,
}

impl MemorySource {
    pub fn new(general: Vec<RawRecord>) -> Self {
        Self {
            general,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category, records: Vec<RawRecord>) -> Self {
        self.categories.insert(category, records);
        self
    }

    pub fn with_unreachable(mut self, category: Category) -> Self {
        self.unreachable.push(category);
        self
    }
}

impl RecordSource for MemorySource {
    async fn fetch(&self, scope: Scope) -> Result<Vec<RawRecord>> {
        match scope {
            Scope::General => Ok(self.general.clone()),
            Scope::Category(category) if self.unreachable.contains(&category) => Err(
                quality_forecast::ForecastError::UpstreamError(format!("{} timed out", category)),
            ),
            Scope::Category(category) => Ok(self.categories.get(&category).cloned().unwrap_or_default()),
        }
    }
}
