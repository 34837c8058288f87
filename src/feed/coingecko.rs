//! CoinGecko PAX Gold quote source
//!
//! PAXG is a digital-gold token redeemable for one troy ounce, so its USD
//! price tracks spot gold closely and the endpoint needs no API key.

use super::http::{number_field, HttpFetcher};
use super::{PriceQuote, QuoteSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;

/// CoinGecko public API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

const COIN_ID: &str = "pax-gold";

/// Quote source backed by CoinGecko's `simple/price` endpoint
pub struct CoinGeckoSource {
    http: HttpFetcher,
    base_url: String,
}

impl CoinGeckoSource {
    pub const NAME: &'static str = "CoinGecko (PAXG)";

    pub fn new(http: HttpFetcher) -> Self {
        Self::with_base_url(http, COINGECKO_API_URL)
    }

    /// Point the source at a different host (mirrors, tests)
    pub fn with_base_url(http: HttpFetcher, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, COIN_ID
        )
    }

    /// Parse `{"pax-gold": {"usd": 2350.4, "usd_24h_change": 0.21}}`
    ///
    /// Only the 24h percent is supplied, so the prior price is recovered as
    /// `price / (1 + pct / 100)`.
    fn parse_response(body: &Value) -> Result<PriceQuote, SourceError> {
        let coin = body
            .get(COIN_ID)
            .ok_or(SourceError::MissingField(COIN_ID))?;
        let price = number_field(coin, "usd")?;

        let quote = match number_field(coin, "usd_24h_change") {
            Ok(pct) if pct.is_finite() && pct > -100.0 => {
                let prior = price / (1.0 + pct / 100.0);
                PriceQuote::with_change(price, price - prior, pct, Self::NAME)
            }
            _ => PriceQuote::with_change(price, 0.0, 0.0, Self::NAME),
        };

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self) -> Result<PriceQuote, SourceError> {
        let body = self.http.get_json(&self.build_url()).await?;
        Self::parse_response(&body)
    }
}
