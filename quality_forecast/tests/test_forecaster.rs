mod common;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use common::{monthly_records, wavy_scores};
use quality_forecast::{seasonal_period, ForecastError, RegularSeries, SeasonalForecaster, SeriesBuilder};
use rstest::rstest;

fn series(values: &[f64]) -> RegularSeries {
    RegularSeries::from_values(NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(), values).unwrap()
}

#[rstest]
#[case(4, 2)]
#[case(5, 2)]
#[case(10, 5)]
#[case(23, 11)]
#[case(24, 12)]
#[case(100, 12)]
fn test_period_selection(#[case] observations: usize, #[case] expected: usize) {
    assert_eq!(seasonal_period(observations).unwrap(), expected);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn test_short_history_is_rejected(#[case] observations: usize) {
    assert!(matches!(
        seasonal_period(observations),
        Err(ForecastError::InsufficientHistory { required: 4, .. })
    ));
}

#[test]
fn test_flat_series_forecasts_flat() {
    let records = monthly_records(2024, 1, &[3.0; 6]);
    let built = SeriesBuilder::build(&records).unwrap();

    let result = SeasonalForecaster::new().forecast(&built).unwrap();

    assert_eq!(result.forecast.len(), 5);
    for point in &result.forecast {
        assert_abs_diff_eq!(point.predicted_score, 3.0, epsilon = 1e-6);
    }
}

#[rstest]
#[case(4)]
#[case(7)]
#[case(12)]
#[case(23)]
#[case(24)]
#[case(30)]
fn test_window_overlaps_last_two_months(#[case] observations: usize) {
    let input = series(&wavy_scores(observations));

    let result = SeasonalForecaster::new().forecast(&input).unwrap();
    let dates = input.dates();

    assert_eq!(result.forecast.len(), 5);
    assert_eq!(result.forecast[0].date, dates[observations - 2]);
    assert_eq!(result.forecast[1].date, dates[observations - 1]);
    assert_eq!(result.historical, input);
    for pair in result.forecast.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + chrono::Months::new(1));
    }
    assert!(result.forecast.iter().all(|p| p.predicted_score.is_finite()));
}

#[test]
fn test_forecast_window_crosses_year_end() {
    let input = RegularSeries::from_values(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), &wavy_scores(8)).unwrap();

    let result = SeasonalForecaster::new().forecast(&input).unwrap();
    let dates: Vec<NaiveDate> = result.forecast.iter().map(|p| p.date).collect();

    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ]
    );
}

#[test]
fn test_three_months_is_not_enough() {
    let result = SeasonalForecaster::new().forecast(&series(&[4.0, 4.2, 3.9]));
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientHistory {
            required: 4,
            actual: 3
        })
    ));
}

#[test]
fn test_rising_series_forecasts_upward() {
    let values: Vec<f64> = (0..12).map(|i| 2.0 + 0.1 * i as f64).collect();

    let result = SeasonalForecaster::new().forecast(&series(&values)).unwrap();
    let future: Vec<f64> = result.forecast[2..].iter().map(|p| p.predicted_score).collect();

    assert!(future.iter().all(|v| *v > values[9]));
}
