use anyhow::{Context, Result};
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::qr::DEFAULT_MIN_DIMENSION;

/// Default port, matching the usual `PORT` convention of hosting platforms
pub const DEFAULT_PORT: u16 = 5000;

/// Upper bound on how many URLs a single `/generate` request may produce
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

/// Upper bound on how many QR codes a single `/generate` request may render
pub const DEFAULT_MAX_QR_CODES: usize = 100;

/// Prefix for environment overrides, e.g. `CAMPAIGN_QR_HOST`
const ENV_PREFIX: &str = "CAMPAIGN_QR";

/// Configuration for the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Directory for log files; logs go to stdout when unset
    pub log_dir: Option<String>,

    /// Minimum edge length of rendered QR codes, in pixels
    pub qr_min_dimension: u32,

    /// Largest number of URLs one generate request may expand to
    pub max_combinations: usize,

    /// Largest number of URLs one generate request may render as QR codes
    pub max_qr_codes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            log_dir: None,
            qr_min_dimension: DEFAULT_MIN_DIMENSION,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_qr_codes: DEFAULT_MAX_QR_CODES,
        }
    }
}

impl ApiConfig {
    /// Loads the configuration from defaults, an optional file and the environment
    ///
    /// Later sources win: defaults, then `path` (any format the `config`
    /// crate recognizes by extension), then `CAMPAIGN_QR_*` variables, then
    /// a plain `PORT` variable.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Self::file_builder(path)?.add_source(Environment::with_prefix(ENV_PREFIX));

        if let Ok(port) = std::env::var("PORT") {
            debug!("Using port {} from PORT", port);
            builder = builder.set_override("port", port)?;
        }

        Self::build(builder)
    }

    /// Defaults plus the optional file, without any environment layer
    fn file_builder(path: Option<&str>) -> Result<ConfigBuilder<DefaultState>> {
        let defaults = ApiConfig::default();
        let mut builder = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("qr_min_dimension", i64::from(defaults.qr_min_dimension))?
            .set_default("max_combinations", defaults.max_combinations as i64)?
            .set_default("max_qr_codes", defaults.max_qr_codes as i64)?;

        if let Some(path) = path {
            debug!("Loading configuration file {}", path);
            builder = builder.add_source(File::with_name(path));
        }

        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Address string suitable for logging
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert!(config.log_dir.is_none());
        assert!(config.max_qr_codes < config.max_combinations);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("campaign_qr_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "host = \"0.0.0.0\"\nqr_min_dimension = 320\nlog_dir = \"logs\"\nmax_qr_codes = 5").unwrap();

        // file layer only; PORT and CAMPAIGN_QR_* are not read here
        let config = ApiConfig::build(ApiConfig::file_builder(path.to_str()).unwrap()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.qr_min_dimension, 320);
        assert_eq!(config.log_dir.as_deref(), Some("logs"));
        assert_eq!(config.max_combinations, DEFAULT_MAX_COMBINATIONS);
        assert_eq!(config.max_qr_codes, 5);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ApiConfig::load(Some("/nonexistent/campaign_qr.toml")).is_err());
    }
}
