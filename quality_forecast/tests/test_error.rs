use quality_forecast::ForecastError;

#[test]
fn test_error_display() {
    let error = ForecastError::InsufficientHistory {
        required: 4,
        actual: 2,
    };
    let message = format!("{}", error);

    assert!(message.contains("at least 4"));
    assert!(message.contains("got 2"));

    let error = ForecastError::UpstreamError("HTTP 503".to_string());
    assert!(error.to_string().contains("HTTP 503"));
}

#[test]
fn test_json_errors_become_data_errors() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = ForecastError::from(parse_error);

    assert!(matches!(error, ForecastError::DataError(_)));
}

#[test]
fn test_error_kinds() {
    let cases = [
        (ForecastError::InsufficientData("empty".to_string()), "insufficient_data"),
        (ForecastError::DecompositionError("period".to_string()), "decomposition"),
        (ForecastError::ForecastingError("diverged".to_string()), "forecasting"),
        (ForecastError::UpstreamError("timeout".to_string()), "upstream"),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind);
    }
}
