//! Configuration types for goldfeed

use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Quote acquisition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Per-source request bound (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How long an accepted quote is served from cache (seconds)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Quotes at or below this USD/oz value are treated as provider glitches
    #[serde(default = "default_min_plausible_price")]
    pub min_plausible_price: f64,

    /// Serve the expired cache entry when every source fails
    #[serde(default)]
    pub serve_stale_on_outage: bool,

    /// Poller refresh period (seconds)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Sources in priority order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceKind>,

    /// Prefix prepended to relay-only endpoints (may be empty)
    #[serde(default = "default_cors_proxy")]
    pub cors_proxy: String,
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Reject values that would silently disable a safeguard
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.min_plausible_price.is_finite() || self.min_plausible_price < 0.0 {
            anyhow::bail!(
                "min_plausible_price must be a finite non-negative number, got {}",
                self.min_plausible_price
            );
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Known quote providers
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Coingecko,
    BinanceUs,
    BinanceGlobal,
    Yahoo,
}

fn default_timeout_ms() -> u64 {
    crate::feed::http::DEFAULT_TIMEOUT.as_millis() as u64
}
fn default_cache_ttl_secs() -> u64 {
    30
}
fn default_min_plausible_price() -> f64 {
    1000.0
}
fn default_poll_interval_secs() -> u64 {
    5
}
fn default_sources() -> Vec<SourceKind> {
    vec![
        SourceKind::Coingecko,
        SourceKind::BinanceUs,
        SourceKind::BinanceGlobal,
        SourceKind::Yahoo,
    ]
}
fn default_cors_proxy() -> String {
    crate::feed::DEFAULT_CORS_PROXY.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            min_plausible_price: default_min_plausible_price(),
            serve_stale_on_outage: false,
            poll_interval_secs: default_poll_interval_secs(),
            sources: default_sources(),
            cors_proxy: default_cors_proxy(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.feed.validate()?;
        Ok(config)
    }
}
