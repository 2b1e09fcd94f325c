//! # Quality Forecast
//!
//! Turns irregular survey quality scores into monthly series and forecasts them.
//!
//! ## Features
//!
//! - Monthly aggregation of raw records with linear gap filling
//! - Adaptive seasonal period selection and additive decomposition
//! - Additive Holt-Winters forecasting with estimated initial states
//! - Alignment of per-category forecasts onto the general series's months
//! - A request-scoped pipeline over any [`RecordSource`]
//!
//! ## Period Selection
//!
//! | observations | period |
//! |--------------|--------|
//! | fewer than 4 | none, `InsufficientHistory` |
//! | 4 to 23      | half the observations |
//! | 24 or more   | 12 |
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use quality_forecast::{RawRecord, SeasonalForecaster, SeriesBuilder};
//!
//! let records: Vec<RawRecord> = (1..=8)
//!     .map(|m| RawRecord::new(Utc.with_ymd_and_hms(2024, m, 10, 0, 0, 0).unwrap(), 4.0))
//!     .collect();
//!
//! let series = SeriesBuilder::build(&records)?;
//! let result = SeasonalForecaster::new().forecast(&series)?;
//!
//! assert_eq!(result.forecast.len(), 5);
//! assert_eq!(result.forecast[0].date, series.dates()[6]);
//! # Ok::<(), quality_forecast::ForecastError>(())
//! ```

pub mod aligner;
pub mod data;
pub mod decomposition;
pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod series;
pub mod utils;

// Re-export commonly used types
pub use crate::aligner::{CategoryAligner, CategoryResult, CombinedEntry, CombinedReport, DateLabeling};
pub use crate::data::{Category, DataLoader, RawRecord};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{seasonal_period, ForecastPoint, ForecastResult, SeasonalForecaster};
pub use crate::pipeline::{AnalysisReport, Pipeline, PipelineOutcome, RecordSource, Scope};
pub use crate::series::{MonthlyPoint, RegularSeries, SeriesBuilder};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
