//! Calendar-month helpers shared by the builder, forecaster and aligner

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// First day of the month containing `timestamp`
pub fn month_start(timestamp: DateTime<Utc>) -> NaiveDate {
    let date = timestamp.date_naive();
    // day 1 always exists
    date.with_day(1).unwrap_or(date)
}

/// Calendar position of a month: `year * 12 + (month - 1)`
///
/// Consecutive months differ by exactly one, across year boundaries too.
pub fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Inverse of [`month_ordinal`], yielding the first day of that month
pub fn from_month_ordinal(ordinal: i32) -> Result<NaiveDate> {
    let year = ordinal.div_euclid(12);
    let month = ordinal.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ForecastError::InvalidParameter(format!("Month ordinal out of range: {}", ordinal))
    })
}

/// Shift a month start forward by `months`
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ForecastError::InvalidParameter(format!("Date overflow adding {} months to {}", months, date)))
}

/// Create the month starts that follow `last`, one per horizon step
pub fn future_months(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon)
        .map(|step| add_months(last, step as u32))
        .collect()
}
