use crate::adapters::outbound::DEFAULT_ENDPOINT;
use crate::application::{
    PipelineLimits, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_MAX_ADDRESSES,
};
use serde::Deserialize;
use std::time::Duration;

/// Largest batch the upstream batch endpoint accepts.
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP server settings
    pub listen_addr: String,
    pub body_limit_bytes: usize,
    pub cors_enabled: bool,
    pub debug: bool,

    // Upstream lookup settings
    pub upstream_url: String,
    pub upstream_timeout_secs: u64,

    // Pipeline limits
    pub max_addresses: usize,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            body_limit_bytes: 2 * 1024 * 1024,
            cors_enabled: false,
            debug: false,
            upstream_url: DEFAULT_ENDPOINT.to_string(),
            upstream_timeout_secs: 15,
            max_addresses: DEFAULT_MAX_ADDRESSES,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: DEFAULT_BATCH_DELAY.as_millis() as u64,
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if self.max_addresses == 0 {
            return Err(ConfigError::InvalidMaxAddresses);
        }
        Ok(())
    }

    /// Limits handed to the lookup service.
    pub fn pipeline_limits(&self) -> PipelineLimits {
        PipelineLimits {
            max_addresses: self.max_addresses,
            batch_size: self.batch_size,
            batch_delay: Duration::from_millis(self.batch_delay_ms),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("batch_size must be between 1 and 100, got {0}")]
    InvalidBatchSize(usize),
    #[error("max_addresses must be greater than zero")]
    InvalidMaxAddresses,
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let listen_addr = var("IPGEO_LISTEN_ADDR")
        .or_else(|| var("PORT").map(|port| format!("0.0.0.0:{}", port.trim())))
        .unwrap_or(defaults.listen_addr);

    let body_limit_bytes = parse_or(&var, "IPGEO_BODY_LIMIT_BYTES", defaults.body_limit_bytes);

    let cors_enabled = var("IPGEO_CORS_ENABLED")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let debug = var("DEBUG").is_some();

    let upstream_url = var("IPGEO_UPSTREAM_URL").unwrap_or(defaults.upstream_url);

    let upstream_timeout_secs = parse_or(
        &var,
        "IPGEO_UPSTREAM_TIMEOUT_SECS",
        defaults.upstream_timeout_secs,
    );

    let max_addresses = parse_or(&var, "IPGEO_MAX_ADDRESSES", defaults.max_addresses);
    let batch_size = parse_or(&var, "IPGEO_BATCH_SIZE", defaults.batch_size);
    let batch_delay_ms = parse_or(&var, "IPGEO_BATCH_DELAY_MS", defaults.batch_delay_ms);

    let cfg = Config {
        listen_addr,
        body_limit_bytes,
        cors_enabled,
        debug,
        upstream_url,
        upstream_timeout_secs,
        max_addresses,
        batch_size,
        batch_delay_ms,
    };

    cfg.validate()?;
    Ok(cfg)
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    var(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
