//! Binance PAXG/USDT 24h ticker quote source
//!
//! The same REST shape is served by Binance Global and Binance US; the two
//! are configured as separate sources because each is geo-blocked in the
//! other's region.

use super::http::{number_field, HttpFetcher};
use super::{PriceQuote, QuoteSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;

/// Binance Global REST base URL
pub const BINANCE_GLOBAL_API_URL: &str = "https://api.binance.com";
/// Binance US REST base URL
pub const BINANCE_US_API_URL: &str = "https://api.binance.us";

const SYMBOL: &str = "PAXGUSDT";

/// Quote source backed by `/api/v3/ticker/24hr`
pub struct BinanceSource {
    http: HttpFetcher,
    base_url: String,
    name: String,
}

impl BinanceSource {
    pub const GLOBAL_NAME: &'static str = "Binance Global (PAXG/USDT)";
    pub const US_NAME: &'static str = "Binance US (PAXG/USDT)";

    /// Binance Global endpoint
    pub fn global(http: HttpFetcher) -> Self {
        Self::with_base_url(http, BINANCE_GLOBAL_API_URL, Self::GLOBAL_NAME)
    }

    /// Binance US endpoint
    pub fn us(http: HttpFetcher) -> Self {
        Self::with_base_url(http, BINANCE_US_API_URL, Self::US_NAME)
    }

    pub fn with_base_url(
        http: HttpFetcher,
        base_url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            name: name.into(),
        }
    }

    fn build_url(&self) -> String {
        format!("{}/api/v3/ticker/24hr?symbol={}", self.base_url, SYMBOL)
    }

    /// Parse a 24h ticker body
    ///
    /// All numeric fields arrive as strings. `priceChange` is preferred; when
    /// it is absent the change is taken against `prevClosePrice`.
    fn parse_response(body: &Value, name: &str) -> Result<PriceQuote, SourceError> {
        let price = number_field(body, "lastPrice")?;

        let finite = |v: f64| v.is_finite().then_some(v);

        if let Some(change) = number_field(body, "priceChange").ok().and_then(finite) {
            let change_percent = match number_field(body, "priceChangePercent") {
                Ok(pct) if pct.is_finite() => pct,
                _ => {
                    let prior = price - change;
                    if prior != 0.0 {
                        change / prior * 100.0
                    } else {
                        0.0
                    }
                }
            };
            return Ok(PriceQuote::with_change(price, change, change_percent, name));
        }

        match number_field(body, "prevClosePrice").ok().and_then(finite) {
            Some(prev_close) => Ok(PriceQuote::from_prior(price, prev_close, name)),
            None => Ok(PriceQuote::with_change(price, 0.0, 0.0, name)),
        }
    }
}

#[async_trait]
impl QuoteSource for BinanceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<PriceQuote, SourceError> {
        let body = self.http.get_json(&self.build_url()).await?;
        Self::parse_response(&body, &self.name)
    }
}
