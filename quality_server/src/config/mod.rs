//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUALITY_*` prefix, `__` as separator)
//! 2. Legacy variables `BASE_URL`, `BASE_URL2` and `AUTH_TOKEN`
//! 3. `quality.toml` in the working directory
//! 4. Built-in defaults
//!
//! `QUALITY_UPSTREAM__BASE_URL` maps to `upstream.base_url`,
//! `QUALITY_SERVER__PORT` to `server.port`, and so on.

mod error;
mod report;
mod server;
mod upstream;

pub use error::ConfigError;
pub use report::ReportConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const CONFIG_FILE: &str = "quality.toml";

/// Variables read without a prefix, kept for existing deployments.
const LEGACY_VARS: [&str; 3] = ["BASE_URL", "BASE_URL2", "AUTH_TOKEN"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl ServiceConfig {
    /// Load configuration from all sources.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working directory (if any), then all sources.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::raw().only(&LEGACY_VARS).map(legacy_key))
            .merge(Env::prefixed("QUALITY_").split("__"))
    }

    /// Check that everything needed to serve requests is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.upstream.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "upstream".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Map a legacy variable onto its nested config key.
fn legacy_key(key: &UncasedStr) -> Uncased<'_> {
    match key.as_str().to_ascii_uppercase().as_str() {
        "BASE_URL" => "upstream.base_url".into(),
        "BASE_URL2" => "upstream.general_url".into(),
        "AUTH_TOKEN" => "upstream.auth_token".into(),
        _ => key.as_str().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_servable() {
        let config = ServiceConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn legacy_keys_are_nested() {
        assert_eq!(legacy_key(UncasedStr::new("base_url")).as_str(), "upstream.base_url");
        assert_eq!(legacy_key(UncasedStr::new("BASE_URL2")).as_str(), "upstream.general_url");
        assert_eq!(legacy_key(UncasedStr::new("AUTH_TOKEN")).as_str(), "upstream.auth_token");
    }
}
