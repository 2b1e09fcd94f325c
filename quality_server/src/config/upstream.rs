//! Upstream survey API configuration.

use serde::{Deserialize, Serialize};

fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Prefix for category endpoints; the category name is appended as-is.
    #[serde(default)]
    pub base_url: String,

    /// Endpoint for the general, uncategorised series.
    #[serde(default)]
    pub general_url: String,

    /// Token sent in the `Authorization` header.
    #[serde(default)]
    pub auth_token: String,

    /// Scheme placed before the token. Empty sends the raw token.
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            general_url: String::new(),
            auth_token: String::new(),
            auth_scheme: default_auth_scheme(),
        }
    }
}

impl UpstreamConfig {
    /// Both endpoints are set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.general_url.trim().is_empty()
    }

    /// `Authorization` header value, if a token is configured.
    pub fn authorization(&self) -> Option<String> {
        let token = self.auth_token.trim();
        if token.is_empty() {
            return None;
        }

        let scheme = self.auth_scheme.trim();
        if scheme.is_empty() || token.starts_with(&format!("{scheme} ")) {
            Some(token.to_string())
        } else {
            Some(format!("{scheme} {token}"))
        }
    }
}
