//! # Quality Pulse
//!
//! Survey quality-score forecasting: the [`forecast`] library and the HTTP
//! [`server`] built on top of it.
//!
//! ## Example
//!
//! ```
//! use quality_pulse_workspace::forecast::{seasonal_period, DateLabeling, Pipeline};
//!
//! assert_eq!(seasonal_period(10).unwrap(), 5);
//! assert_eq!(seasonal_period(36).unwrap(), 12);
//!
//! let pipeline = Pipeline::new(DateLabeling::YearMonth);
//! assert_eq!(pipeline.categories().len(), 7);
//! ```

pub use quality_forecast as forecast;
pub use quality_server as server;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crates_are_reachable_through_the_facade() {
        assert_eq!(forecast::NAME, "quality_forecast");
        let config = server::ServiceConfig::default();
        assert_eq!(config.server.port, 5050);
    }
}
