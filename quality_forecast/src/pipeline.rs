//! Orchestrates fetching, forecasting and aligning every series of one request

use crate::aligner::{CategoryAligner, CategoryResult, CombinedReport, DateLabeling};
use crate::data::{Category, RawRecord};
use crate::error::{ForecastError, Result};
use crate::forecaster::{ForecastResult, SeasonalForecaster};
use crate::series::SeriesBuilder;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::future::Future;

/// Message returned with every failed run
pub const FAILURE_MESSAGE: &str = "not enough data";

/// Which series a fetch is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The uncategorised series
    General,
    /// One survey category
    Category(Category),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::General => f.write_str("general"),
            Scope::Category(category) => write!(f, "category {}", category),
        }
    }
}

/// Source of raw records for a scope
///
/// An empty vector is a valid answer meaning "no data", not an error.
pub trait RecordSource {
    fn fetch(&self, scope: Scope) -> impl Future<Output = Result<Vec<RawRecord>>> + Send;
}

/// Build and forecast one series from its raw records
pub fn analyze_records(forecaster: &SeasonalForecaster, records: &[RawRecord]) -> Result<ForecastResult> {
    let series = SeriesBuilder::build(records)?;
    tracing::info!(observations = series.len(), "Regularised monthly series");
    forecaster.forecast(&series)
}

/// Results collected during a single run
#[derive(Debug, Default)]
pub struct ReportAccumulator {
    general: Option<ForecastResult>,
    categories: Vec<CategoryResult>,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_general(&mut self, result: ForecastResult) {
        self.general = Some(result);
    }

    pub fn push_category(&mut self, result: CategoryResult) {
        self.categories.push(result);
    }

    pub fn categories(&self) -> &[CategoryResult] {
        &self.categories
    }

    /// Align the collected categories against the general series
    pub fn finish(self, aligner: &CategoryAligner) -> Result<AnalysisReport> {
        let general = self.general.ok_or_else(|| {
            ForecastError::InsufficientData("General series was not forecast".to_string())
        })?;
        let categories = aligner.align(&general, &self.categories);

        Ok(AnalysisReport {
            general,
            categories,
            labeling: aligner.labeling(),
        })
    }
}

/// Successful run: the general forecast plus the aligned category report
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub general: ForecastResult,
    pub categories: CombinedReport,
    labeling: DateLabeling,
}

/// Observed general score on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealDataPoint {
    pub date: String,
    pub score: f64,
}

/// Predicted general score on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictDataPoint {
    pub date: String,
    #[serde(rename = "RealScore")]
    pub real_score: Option<f64>,
    #[serde(rename = "HWScore")]
    pub hw_score: f64,
}

/// The general series as shown to dashboards
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSection {
    pub real_data: Vec<RealDataPoint>,
    pub predict_data: Vec<PredictDataPoint>,
}

impl AnalysisReport {
    /// Render the general forecast with this report's date labels
    pub fn general_section(&self) -> GeneralSection {
        let real_data = self
            .general
            .historical
            .points()
            .iter()
            .map(|p| RealDataPoint {
                date: self.labeling.label(p.date),
                score: p.score,
            })
            .collect();
        let predict_data = self
            .general
            .forecast
            .iter()
            .map(|p| PredictDataPoint {
                date: self.labeling.label(p.date),
                real_score: None,
                hw_score: p.predicted_score,
            })
            .collect();

        GeneralSection {
            real_data,
            predict_data,
        }
    }
}

impl Serialize for AnalysisReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnalysisReport", 2)?;
        state.serialize_field("general", &self.general_section())?;
        state.serialize_field("categories", &self.categories)?;
        state.end()
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Success(AnalysisReport),
    Failure { message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }
}

/// Runs the general series and every category, then aligns them
#[derive(Debug, Clone)]
pub struct Pipeline {
    forecaster: SeasonalForecaster,
    aligner: CategoryAligner,
    categories: Vec<Category>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DateLabeling::default())
    }
}

impl Pipeline {
    /// Pipeline over every category in analysis order
    pub fn new(labeling: DateLabeling) -> Self {
        Self {
            forecaster: SeasonalForecaster::new(),
            aligner: CategoryAligner::new(labeling),
            categories: Category::ALL.to_vec(),
        }
    }

    /// Restrict the run to a subset of categories, kept in the given order
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    async fn analyze<S: RecordSource + Sync>(&self, source: &S, scope: Scope) -> Result<ForecastResult> {
        let records = source.fetch(scope).await?;
        tracing::debug!(%scope, records = records.len(), "Fetched records");
        analyze_records(&self.forecaster, &records)
    }

    /// Run the whole analysis for one request
    ///
    /// A failing category is logged and left out; a failing general series
    /// fails the run.
    pub async fn run<S: RecordSource + Sync>(&self, source: &S) -> PipelineOutcome {
        let mut accumulator = ReportAccumulator::new();

        match self.analyze(source, Scope::General).await {
            Ok(result) => accumulator.set_general(result),
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "General series failed, aborting run");
                return PipelineOutcome::Failure {
                    message: FAILURE_MESSAGE.to_string(),
                };
            }
        }

        for &category in &self.categories {
            match self.analyze(source, Scope::Category(category)).await {
                Ok(result) => {
                    tracing::info!(%category, "Category forecast ready");
                    accumulator.push_category(CategoryResult::new(category, result));
                }
                Err(err) => {
                    tracing::warn!(%category, kind = err.kind(), error = %err, "Skipping category");
                }
            }
        }

        match accumulator.finish(&self.aligner) {
            Ok(report) => PipelineOutcome::Success(report),
            Err(err) => {
                tracing::error!(error = %err, "Could not assemble report");
                PipelineOutcome::Failure {
                    message: FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }
}
