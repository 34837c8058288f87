//! Live price coordinator
//!
//! Walks the configured sources in priority order and trusts the first one
//! whose quote passes the sanity check. Accepted quotes are cached for the
//! configured TTL so the periodic poller does not burn free-tier quota.

use super::cache::{CacheState, QuoteCache};
use super::validation::SanityCheck;
use super::LivePrice;
use crate::config::FeedConfig;
use crate::feed::{PriceQuote, QuoteSource, SourceError};
use crate::telemetry::{self, SourceOutcome};
use futures_util::future::join_all;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

/// Coordinator tuning
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bound applied to every source call
    pub timeout: Duration,
    /// Cache lifetime of an accepted quote
    pub cache_ttl: Duration,
    /// Lowest USD/oz value treated as plausible
    pub min_plausible_price: f64,
    /// Return the expired entry instead of `Unavailable` on total outage
    pub serve_stale_on_outage: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

impl From<&FeedConfig> for ServiceConfig {
    fn from(feed: &FeedConfig) -> Self {
        Self {
            timeout: feed.timeout(),
            cache_ttl: feed.cache_ttl(),
            min_plausible_price: feed.min_plausible_price,
            serve_stale_on_outage: feed.serve_stale_on_outage,
        }
    }
}

/// Multi-source price service with a single-slot cache
pub struct PriceService {
    sources: Vec<Box<dyn QuoteSource>>,
    config: ServiceConfig,
    sanity: SanityCheck,
    cache: RwLock<QuoteCache>,
    /// Serializes refreshes so concurrent callers share one round trip
    refresh: Mutex<()>,
}

impl PriceService {
    /// Create a service over `sources`, tried in the given order
    pub fn new(sources: Vec<Box<dyn QuoteSource>>, config: ServiceConfig) -> Self {
        Self {
            sanity: SanityCheck::new(config.min_plausible_price),
            cache: RwLock::new(QuoteCache::new(config.cache_ttl)),
            refresh: Mutex::new(()),
            sources,
            config,
        }
    }

    /// Build the sources named in `feed` and wrap them in a service
    pub fn from_config(feed: &FeedConfig) -> anyhow::Result<Self> {
        feed.validate()?;
        let sources = crate::feed::build_sources(feed)?;
        Ok(Self::new(sources, ServiceConfig::from(feed)))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Names of the configured sources in priority order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Freshest acceptable quote
    ///
    /// Served from cache unless `bypass_cache` is set or the entry expired.
    /// Never returns an error: a total outage is [`LivePrice::Unavailable`]
    /// and leaves the cache as it was.
    pub async fn get_live_price(&self, bypass_cache: bool) -> LivePrice {
        if !bypass_cache {
            if let Some(quote) = self.cached_quote().await {
                return LivePrice::Cached(quote);
            }
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if !bypass_cache {
            if let Some(quote) = self.cached_quote().await {
                return LivePrice::Cached(quote);
            }
        }

        for source in &self.sources {
            let Some(quote) = self.try_source(source.as_ref()).await else {
                continue;
            };

            self.cache.write().await.store(quote.clone(), Instant::now());
            tracing::info!(
                source = %quote.source,
                price = quote.price,
                change = quote.change,
                change_pct = quote.change_percent,
                "Accepted live price"
            );
            return LivePrice::Fresh(quote);
        }

        telemetry::record_outage();

        if self.config.serve_stale_on_outage {
            if let Some(stale) = self.cache.read().await.get_any().cloned() {
                tracing::warn!(
                    source = %stale.source,
                    price = stale.price,
                    "All sources failed, serving stale price"
                );
                return LivePrice::Stale(stale);
            }
        }

        tracing::warn!(
            sources = self.sources.len(),
            "All sources failed, price unavailable"
        );
        LivePrice::Unavailable
    }

    /// Query every source at once and return each plausible quote
    ///
    /// For cross-source comparison; failures are dropped and the cache is
    /// neither read nor written.
    pub async fn get_all_prices(&self) -> Vec<PriceQuote> {
        let attempts = self.sources.iter().map(|s| self.try_source(s.as_ref()));
        join_all(attempts).await.into_iter().flatten().collect()
    }

    /// Discard the cached quote
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        tracing::debug!("Price cache cleared");
    }

    /// Current cache state, for diagnostics
    pub async fn cache_state(&self) -> CacheState {
        self.cache.read().await.state_at(Instant::now())
    }

    async fn cached_quote(&self) -> Option<PriceQuote> {
        let quote = self
            .cache
            .read()
            .await
            .get_valid(Instant::now())
            .cloned();

        if quote.is_some() {
            telemetry::record_cache_hit();
        }
        quote
    }

    /// One bounded attempt against one source, downgraded to `Option`
    async fn try_source(&self, source: &dyn QuoteSource) -> Option<PriceQuote> {
        let name = source.name();
        let started = Instant::now();
        tracing::debug!(source = name, "Querying quote source");

        // Dropping the fetch future on timeout aborts the in-flight request
        let result = match tokio::time::timeout(self.config.timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.config.timeout)),
        };
        let elapsed = started.elapsed();

        let quote = match result {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(source = name, error = %e, "Quote source failed");
                telemetry::record_source_fetch(name, SourceOutcome::Failed, elapsed);
                return None;
            }
        };

        if let Err(reason) = self.sanity.check(&quote) {
            tracing::warn!(
                source = name,
                price = quote.price,
                reason = %reason,
                "Rejected implausible quote"
            );
            telemetry::record_source_fetch(name, SourceOutcome::Rejected, elapsed);
            return None;
        }

        telemetry::record_source_fetch(name, SourceOutcome::Accepted, elapsed);
        Some(quote)
    }
}
