//! # Quality Server
//!
//! HTTP service exposing the quality score forecast.
//!
//! - `GET /analyze` fetches the general and per-category records, forecasts
//!   them and returns the combined report.
//! - `GET /health` answers liveness probes.

pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

pub use crate::config::{ConfigError, ServiceConfig};
pub use crate::error::{Result, ServerError};
pub use crate::upstream::UpstreamClient;

use axum::{routing::get, Router};
use quality_forecast::Pipeline;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub source: Arc<UpstreamClient>,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            pipeline: Arc::new(Pipeline::new(config.report.date_labels)),
            source: Arc::new(UpstreamClient::new(config.upstream.clone())?),
        })
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", get(routes::analyze))
        .route("/health", get(routes::liveness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: ServiceConfig) -> Result<()> {
    config.validate()?;

    let state = AppState::from_config(&config)?;
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(%address, labels = ?config.report.date_labels, "Quality server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Quality server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
