//! Yahoo Finance gold futures (GC=F) quote source
//!
//! Yahoo does not serve CORS headers, so browser deployments reach it through
//! a public relay. The relay prefix is configurable and may be empty.

use super::http::{number_field, HttpFetcher};
use super::{PriceQuote, QuoteSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;

/// Yahoo chart API base URL
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// Public CORS relay used by default
pub const DEFAULT_CORS_PROXY: &str = "https://corsproxy.io/?";

const SYMBOL: &str = "GC=F";

/// Quote source backed by the Yahoo v8 chart endpoint
pub struct YahooSource {
    http: HttpFetcher,
    base_url: String,
    proxy: String,
}

impl YahooSource {
    pub const NAME: &'static str = "Yahoo GC=F";

    pub fn new(http: HttpFetcher, proxy: impl Into<String>) -> Self {
        Self::with_base_url(http, YAHOO_CHART_URL, proxy)
    }

    pub fn with_base_url(
        http: HttpFetcher,
        base_url: impl Into<String>,
        proxy: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            proxy: proxy.into(),
        }
    }

    fn build_url(&self) -> String {
        format!("{}{}/{}?interval=1m", self.proxy, self.base_url, SYMBOL)
    }

    /// Parse `chart.result[0].meta`
    ///
    /// Change is measured against `chartPreviousClose`, falling back to
    /// `previousClose`.
    fn parse_response(body: &Value) -> Result<PriceQuote, SourceError> {
        let meta = body
            .pointer("/chart/result/0/meta")
            .ok_or(SourceError::MissingField("chart.result[0].meta"))?;

        let price = number_field(meta, "regularMarketPrice")?;
        let prev_close = number_field(meta, "chartPreviousClose")
            .or_else(|_| number_field(meta, "previousClose"));

        Ok(match prev_close {
            Ok(prev) => PriceQuote::from_prior(price, prev, Self::NAME),
            Err(_) => PriceQuote::with_change(price, 0.0, 0.0, Self::NAME),
        })
    }
}

#[async_trait]
impl QuoteSource for YahooSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self) -> Result<PriceQuote, SourceError> {
        let body = self.http.get_json(&self.build_url()).await?;
        Self::parse_response(&body)
    }
}
