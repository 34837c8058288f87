//! Single-slot time-boxed quote cache

use crate::feed::PriceQuote;
use std::time::Duration;
use tokio::time::Instant;

/// State of the cache cell at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Valid,
    Stale,
}

/// One accepted quote and the instant it stops being servable
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub quote: PriceQuote,
    pub expiry: Instant,
}

impl CacheEntry {
    /// Servable iff `now` is strictly before expiry
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expiry
    }
}

/// Holds at most one quote, regardless of which source produced it
#[derive(Debug)]
pub struct QuoteCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn state_at(&self, now: Instant) -> CacheState {
        match &self.entry {
            None => CacheState::Empty,
            Some(entry) if entry.is_valid_at(now) => CacheState::Valid,
            Some(_) => CacheState::Stale,
        }
    }

    /// The cached quote if it has not expired
    pub fn get_valid(&self, now: Instant) -> Option<&PriceQuote> {
        self.entry
            .as_ref()
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| &entry.quote)
    }

    /// The cached quote whether or not it has expired
    pub fn get_any(&self) -> Option<&PriceQuote> {
        self.entry.as_ref().map(|entry| &entry.quote)
    }

    /// Overwrite the cell and reset expiry to `now + ttl`
    pub fn store(&mut self, quote: PriceQuote, now: Instant) {
        self.entry = Some(CacheEntry {
            quote,
            expiry: now + self.ttl,
        });
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
