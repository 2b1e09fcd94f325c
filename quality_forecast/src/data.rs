//! Raw survey records and the fixed category list

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::Read;

/// A single dated quality score as delivered by the upstream API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// When the score was recorded
    pub creation_date: DateTime<Utc>,
    /// The quality score
    pub score: f64,
}

impl RawRecord {
    /// Create a new raw record
    pub fn new(creation_date: DateTime<Utc>, score: f64) -> Self {
        Self {
            creation_date,
            score,
        }
    }
}

/// Survey categories, in the order they are analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Service,
    Driver,
    TrafficSign,
    Navigation,
    Stops,
    TravelTime,
    Behavior,
}

impl Category {
    /// Every category in analysis order
    pub const ALL: [Category; 7] = [
        Category::Service,
        Category::Driver,
        Category::TrafficSign,
        Category::Navigation,
        Category::Stops,
        Category::TravelTime,
        Category::Behavior,
    ];

    /// Display name, used as the upstream URL suffix and in report field names
    pub fn name(&self) -> &'static str {
        match self {
            Category::Service => "Service",
            Category::Driver => "Driver",
            Category::TrafficSign => "Traffic Sign",
            Category::Navigation => "Navigation",
            Category::Stops => "Stops",
            Category::TravelTime => "Travel Time",
            Category::Behavior => "Behavior",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record shape on the wire; scores may be null
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(deserialize_with = "deserialize_timestamp")]
    creation_date: DateTime<Utc>,
    score: Option<f64>,
}

/// Upstream response body: `{"data": [ {creationDate, score}, ... ]}`
#[derive(Debug, Deserialize)]
pub struct RecordsEnvelope {
    #[serde(default)]
    data: Vec<WireRecord>,
}

impl RecordsEnvelope {
    /// Convert the payload into records, dropping entries without a score
    pub fn into_records(self) -> Vec<RawRecord> {
        let total = self.data.len();
        let records: Vec<RawRecord> = self
            .data
            .into_iter()
            .filter_map(|r| r.score.map(|score| RawRecord::new(r.creation_date, score)))
            .collect();

        if records.len() < total {
            tracing::debug!(
                dropped = total - records.len(),
                "Dropped upstream records without a score"
            );
        }

        records
    }
}

/// Loader for upstream record payloads
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Decode records from a JSON string
    pub fn from_json(body: &str) -> Result<Vec<RawRecord>> {
        let envelope: RecordsEnvelope = serde_json::from_str(body)?;
        Ok(envelope.into_records())
    }

    /// Decode records from any reader producing JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
        let envelope: RecordsEnvelope = serde_json::from_reader(reader)?;
        Ok(envelope.into_records())
    }
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 with any offset, naive date-times (taken as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ForecastError::DataError(format!("Unrecognised timestamp: {:?}", raw)))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
