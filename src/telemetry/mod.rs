//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use self::metrics::{
    init_metrics, record_cache_hit, record_outage, record_source_fetch, SourceOutcome,
};
pub use crate::config::LogFormat;
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics(port)?;
    }

    Ok(())
}
