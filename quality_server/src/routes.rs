//! API route handlers

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quality_forecast::PipelineOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "hw succeed";

/// Envelope wrapping every `/analyze` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub data: Value,
    pub message: String,
}

impl ApiResponse {
    pub fn success(data: Value) -> Self {
        Self {
            status: "success".to_string(),
            data,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: Value::Array(Vec::new()),
            message: message.into(),
        }
    }
}

/// Shape a pipeline outcome into its status code and envelope
pub fn respond(outcome: PipelineOutcome) -> (StatusCode, Json<ApiResponse>) {
    match outcome {
        PipelineOutcome::Success(report) => match serde_json::to_value(&report) {
            Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data))),
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode report");
                (
                    StatusCode::EXPECTATION_FAILED,
                    Json(ApiResponse::error(quality_forecast::pipeline::FAILURE_MESSAGE)),
                )
            }
        },
        PipelineOutcome::Failure { message } => {
            (StatusCode::EXPECTATION_FAILED, Json(ApiResponse::error(message)))
        }
    }
}

/// Run the full analysis against the upstream API
pub async fn analyze(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    let outcome = state.pipeline.run(state.source.as_ref()).await;
    respond(outcome)
}

/// Liveness probe
pub async fn liveness() -> Json<Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
