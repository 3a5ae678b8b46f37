//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `PUNTER_API_TOKEN`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub trading: TradingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the AMM backend (e.g. `https://api.example.com`).
    pub api_url: String,
    /// Bearer token loaded from `PUNTER_API_TOKEN` env var at runtime
    /// (never from the config file).
    #[serde(skip)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    /// Debounce window applied to quote input before dispatch.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long market snapshots stay fresh in the cache.
    #[serde(default = "default_snapshot_ttl_ms")]
    pub snapshot_ttl_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_snapshot_ttl_ms() -> u64 {
    5_000
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            snapshot_ttl_ms: default_snapshot_ttl_ms(),
        }
    }
}

impl TradingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn snapshot_ttl(&self) -> Duration {
        Duration::from_millis(self.snapshot_ttl_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.network.api_token = std::env::var("PUNTER_API_TOKEN").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if !self.network.api_url.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("expected an http(s) URL, got {}", self.network.api_url),
            }
            .into());
        }
        if self.trading.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
