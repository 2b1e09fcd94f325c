//! HTTP record source backed by the survey API

use crate::config::UpstreamConfig;
use crate::error::Result;
use quality_forecast::data::RecordsEnvelope;
use quality_forecast::{ForecastError, RawRecord, RecordSource, Scope};
use reqwest::header::AUTHORIZATION;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches raw records for each scope from the configured endpoints
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Endpoint for a scope. Category endpoints append the display name to
    /// the base URL without a separator.
    pub fn url_for(&self, scope: Scope) -> String {
        match scope {
            Scope::General => self.config.general_url.clone(),
            Scope::Category(category) => format!("{}{}", self.config.base_url, category.name()),
        }
    }

    async fn get_records(&self, url: &str) -> quality_forecast::Result<Vec<RawRecord>> {
        let mut request = self.http.get(url);
        if let Some(authorization) = self.config.authorization() {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForecastError::UpstreamError(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::UpstreamError(format!(
                "{url} returned status {status}"
            )));
        }

        let envelope: RecordsEnvelope = response
            .json()
            .await
            .map_err(|e| ForecastError::UpstreamError(format!("Invalid payload from {url}: {e}")))?;

        Ok(envelope.into_records())
    }
}

impl RecordSource for UpstreamClient {
    async fn fetch(&self, scope: Scope) -> quality_forecast::Result<Vec<RawRecord>> {
        let url = self.url_for(scope);
        tracing::debug!(%scope, %url, "Fetching records");
        self.get_records(&url).await
    }
}
