//! Price acquisition service
//!
//! Coordinator, cache and poller built on top of the quote sources in
//! [`crate::feed`].

mod cache;
mod coordinator;
mod poller;
mod validation;

pub use cache::{CacheEntry, CacheState, QuoteCache};
pub use coordinator::{PriceService, ServiceConfig};
pub use poller::{LastKnownPrice, PriceDisplay, PricePoller};
pub use validation::{Implausible, SanityCheck, DEFAULT_MIN_PLAUSIBLE_PRICE};

use crate::feed::PriceQuote;

/// Result of one coordinator call
#[derive(Debug, Clone, PartialEq)]
pub enum LivePrice {
    /// Fetched from a source during this call
    Fresh(PriceQuote),
    /// Served from an unexpired cache entry, no network call made
    Cached(PriceQuote),
    /// Every source failed; expired entry served (opt-in mode only)
    Stale(PriceQuote),
    /// Every source failed and nothing could be served
    Unavailable,
}

impl LivePrice {
    /// The quote, if any was produced
    pub fn quote(&self) -> Option<&PriceQuote> {
        match self {
            LivePrice::Fresh(q) | LivePrice::Cached(q) | LivePrice::Stale(q) => Some(q),
            LivePrice::Unavailable => None,
        }
    }

    pub fn into_quote(self) -> Option<PriceQuote> {
        match self {
            LivePrice::Fresh(q) | LivePrice::Cached(q) | LivePrice::Stale(q) => Some(q),
            LivePrice::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, LivePrice::Unavailable)
    }

    /// Short label for display and logs
    pub fn kind(&self) -> &'static str {
        match self {
            LivePrice::Fresh(_) => "fresh",
            LivePrice::Cached(_) => "cached",
            LivePrice::Stale(_) => "stale",
            LivePrice::Unavailable => "unavailable",
        }
    }
}
