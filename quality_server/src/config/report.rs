//! Report rendering configuration.

use quality_forecast::DateLabeling;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// `month` (e.g. `March`) or `year_month` (e.g. `March 2024`).
    #[serde(default)]
    pub date_labels: DateLabeling,
}
