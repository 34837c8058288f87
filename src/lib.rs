//! goldfeed: live gold price acquisition across flaky public endpoints
//!
//! This library provides:
//! - Quote sources for CoinGecko, Binance (US and Global) and Yahoo futures
//! - A coordinator that falls back across sources in priority order
//! - A single-slot TTL cache and a plausibility check on every quote
//! - A periodic poller that keeps the last known good price through outages
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod feed;
pub mod service;
pub mod telemetry;
