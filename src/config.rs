use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_TRACKING_URL: &str =
    "https://www.indiapost.gov.in/_layouts/15/dop.portal.tracking/trackconsignment.aspx";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding the persisted key-value state.
    pub store_path: PathBuf,
    pub tracking_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store_path: PathBuf::from("data/storage.json"),
            tracking_url: DEFAULT_TRACKING_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            store_path: lookup("ORDER_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            tracking_url: lookup("CARRIER_TRACKING_URL").unwrap_or(defaults.tracking_url),
        })
    }
}
