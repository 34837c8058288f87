//! Prometheus metrics

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

const SOURCE_FETCH_TOTAL: &str = "goldfeed_source_fetch_total";
const SOURCE_LATENCY_MS: &str = "goldfeed_source_latency_ms";
const CACHE_HITS_TOTAL: &str = "goldfeed_cache_hits_total";
const OUTAGES_TOTAL: &str = "goldfeed_outages_total";

/// Outcome of one source attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Quote returned and passed the sanity check
    Accepted,
    /// Quote returned but implausible
    Rejected,
    /// Transport error, bad status, timeout or malformed body
    Failed,
}

impl SourceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOutcome::Accepted => "accepted",
            SourceOutcome::Rejected => "rejected",
            SourceOutcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus exporter on `0.0.0.0:port`
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record one source attempt
pub fn record_source_fetch(source: &str, outcome: SourceOutcome, elapsed: Duration) {
    metrics::counter!(
        SOURCE_FETCH_TOTAL,
        "source" => source.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    metrics::histogram!(SOURCE_LATENCY_MS, "source" => source.to_string())
        .record(elapsed.as_secs_f64() * 1000.0);
}

pub fn record_cache_hit() {
    metrics::counter!(CACHE_HITS_TOTAL).increment(1);
}

/// Every configured source failed in one coordinator call
pub fn record_outage() {
    metrics::counter!(OUTAGES_TOTAL).increment(1);
}
