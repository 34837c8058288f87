//! Integration tests for configuration loading

use goldfeed::config::{Config, LogFormat, SourceKind};
use goldfeed::service::{PriceService, ServiceConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.feed.timeout_ms, 5000);
    assert_eq!(config.feed.cache_ttl_secs, 30);
    assert_eq!(config.feed.min_plausible_price, 1000.0);
    assert_eq!(
        config.feed.sources,
        vec![
            SourceKind::Coingecko,
            SourceKind::BinanceUs,
            SourceKind::BinanceGlobal,
            SourceKind::Yahoo,
        ]
    );
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [feed]
        timeout_ms = 2000
        cache_ttl_secs = 15
        sources = ["yahoo"]
        cors_proxy = ""
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let service_config = ServiceConfig::from(&config.feed);
    assert_eq!(service_config.timeout, Duration::from_millis(2000));
    assert_eq!(service_config.cache_ttl, Duration::from_secs(15));
    assert!(!service_config.serve_stale_on_outage);

    let service = PriceService::from_config(&config.feed).unwrap();
    assert_eq!(service.source_names(), vec!["Yahoo GC=F"]);
}

#[test]
fn test_config_load_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[feed\ntimeout_ms = ").unwrap();
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_config_load_rejects_nan_floor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[feed]\nmin_plausible_price = nan").unwrap();

    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("min_plausible_price"));
}

#[test]
fn test_config_load_rejects_zero_timeout() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[feed]\ntimeout_ms = 0").unwrap();

    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));
}
