use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use quality_forecast::models::holt_winters::HoltWinters;
use quality_forecast::models::optimize::NelderMead;
use quality_forecast::models::{ForecastModel, TrainedForecastModel};
use quality_forecast::{ForecastError, RegularSeries};

fn create_test_data(values: &[f64]) -> RegularSeries {
    RegularSeries::from_values(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), values).unwrap()
}

#[test]
fn test_holt_winters_repeats_a_clean_season() {
    let pattern = [1.0, 3.0, 2.0, 4.0];
    let values: Vec<f64> = pattern.iter().cycle().take(16).copied().collect();
    let data = create_test_data(&values);

    let model = HoltWinters::new(4).unwrap();
    let trained = model.train(&data).unwrap();

    assert!(trained.sse() < 1e-6);
    let forecast = trained.forecast(4).unwrap();
    for (predicted, expected) in forecast.iter().zip(pattern.iter()) {
        assert_abs_diff_eq!(*predicted, *expected, epsilon = 1e-3);
    }
}

#[test]
fn test_holt_winters_predict_spans_sample_end() {
    let values = vec![3.0, 4.0, 3.5, 4.5, 3.2, 4.1, 3.6, 4.4, 3.3, 4.2];
    let data = create_test_data(&values);
    let trained = HoltWinters::new(5).unwrap().train(&data).unwrap();

    let window = trained.predict(8, 12).unwrap();
    assert_eq!(window.len(), 5);
    assert_eq!(window[0], trained.fitted_values()[8]);
    assert_eq!(window[1], trained.fitted_values()[9]);
    assert_eq!(&window[2..], trained.forecast(3).unwrap().as_slice());

    assert!(trained.predict(4, 2).is_err());
}

#[test]
fn test_holt_winters_parameters_and_accuracy() {
    let values: Vec<f64> = (0..24)
        .map(|i| 3.0 + 0.05 * i as f64 + if i % 12 < 6 { 0.4 } else { -0.4 })
        .collect();
    let data = create_test_data(&values);

    let model = HoltWinters::new(12)
        .unwrap()
        .with_optimizer(NelderMead::new(2_000, 1e-9));
    assert_eq!(model.period(), 12);
    assert!(model.name().contains("period=12"));

    let trained = model.train(&data).unwrap();
    let params = trained.params();
    for p in [params.alpha, params.beta, params.gamma] {
        assert!((0.0..=1.0).contains(&p));
    }

    let (_, _, seasonal) = trained.components();
    assert_eq!(seasonal.len(), 12);
    assert_eq!(trained.fitted_values().len(), values.len());
    assert!(trained.accuracy().rmse.is_finite());
}

#[test]
fn test_holt_winters_invalid_inputs() {
    assert!(matches!(
        HoltWinters::new(1),
        Err(ForecastError::InvalidParameter(_))
    ));

    let short = create_test_data(&[1.0, 2.0, 3.0, 4.0]);
    assert!(matches!(
        HoltWinters::new(6).unwrap().train(&short),
        Err(ForecastError::ForecastingError(_))
    ));
}

#[test]
fn test_nelder_mead_in_three_dimensions() {
    let optimizer = NelderMead::default();
    let minimum = optimizer.minimize(
        |x| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2) + 4.0 * (x[2] - 0.5).powi(2) + 2.0,
        &[0.0, 0.0, 0.0],
        &[0.5, 0.5, 0.5],
    );

    assert_abs_diff_eq!(minimum.point[0], 3.0, epsilon = 1e-4);
    assert_abs_diff_eq!(minimum.point[1], -1.0, epsilon = 1e-4);
    assert_abs_diff_eq!(minimum.point[2], 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(minimum.value, 2.0, epsilon = 1e-8);
    assert!(minimum.iterations > 0);
}
