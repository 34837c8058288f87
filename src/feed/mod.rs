//! Price feed module
//!
//! Quote sources for live gold prices. Each source issues one bounded HTTP
//! request to a fixed provider and normalizes the body into a [`PriceQuote`].

mod binance;
mod coingecko;
pub mod http;
mod types;
mod yahoo;

pub use binance::{BinanceSource, BINANCE_GLOBAL_API_URL, BINANCE_US_API_URL};
pub use coingecko::{CoinGeckoSource, COINGECKO_API_URL};
pub use http::HttpFetcher;
pub use types::{PriceQuote, SourceError};
pub use yahoo::{YahooSource, DEFAULT_CORS_PROXY, YAHOO_CHART_URL};

use crate::config::{FeedConfig, SourceKind};
use async_trait::async_trait;

/// Trait for quote source implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Label recorded on every quote this source produces
    fn name(&self) -> &str;
    /// Fetch one quote; any error means "no data from this source"
    async fn fetch(&self) -> Result<PriceQuote, SourceError>;
}

/// Build the configured sources in priority order
///
/// All sources share one HTTP client bounded by the feed timeout.
pub fn build_sources(config: &FeedConfig) -> anyhow::Result<Vec<Box<dyn QuoteSource>>> {
    let http = HttpFetcher::new(config.timeout())?;

    let sources = config
        .sources
        .iter()
        .map(|kind| -> Box<dyn QuoteSource> {
            match kind {
                SourceKind::Coingecko => Box::new(CoinGeckoSource::new(http.clone())),
                SourceKind::BinanceUs => Box::new(BinanceSource::us(http.clone())),
                SourceKind::BinanceGlobal => Box::new(BinanceSource::global(http.clone())),
                SourceKind::Yahoo => {
                    Box::new(YahooSource::new(http.clone(), config.cors_proxy.clone()))
                }
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        sources = ?sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
        "Configured quote sources"
    );

    Ok(sources)
}
