//! Periodic live price poller
//!
//! Refreshes the price on a fixed interval and keeps the last known good
//! quote on screen through outages, flagging it as stale instead of blanking.

use super::{LivePrice, PriceService};
use crate::feed::PriceQuote;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// What a price display should show after one poll
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDisplay {
    /// Last known good quote, if one was ever received
    pub quote: Option<PriceQuote>,
    /// True when `quote` did not come from a fresh or cached read this cycle
    pub stale: bool,
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(q) = &self.quote else {
            return write!(f, "XAU/USD WAITING...");
        };

        write!(
            f,
            "XAU/USD {:.2} {:+.2} ({:+.2}%) via {} at {}",
            q.price,
            q.change,
            q.change_percent,
            q.source,
            q.timestamp.format("%H:%M:%S")
        )?;
        if self.stale {
            write!(f, " [STALE]")?;
        }
        Ok(())
    }
}

/// Tracks the last known good quote across poll cycles
#[derive(Debug, Default)]
pub struct LastKnownPrice {
    last: Option<PriceQuote>,
}

impl LastKnownPrice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one coordinator result into the display state
    pub fn update(&mut self, result: LivePrice) -> PriceDisplay {
        let stale = match result {
            LivePrice::Fresh(quote) | LivePrice::Cached(quote) => {
                self.last = Some(quote);
                false
            }
            LivePrice::Stale(quote) => {
                self.last = Some(quote);
                true
            }
            LivePrice::Unavailable => true,
        };

        PriceDisplay {
            quote: self.last.clone(),
            stale,
        }
    }

    pub fn last(&self) -> Option<&PriceQuote> {
        self.last.as_ref()
    }
}

/// Drives [`PriceService::get_live_price`] on a fixed interval
pub struct PricePoller {
    service: Arc<PriceService>,
    interval: Duration,
}

impl PricePoller {
    /// Create a poller; `interval` must be non-zero
    pub fn new(service: Arc<PriceService>, interval: Duration) -> anyhow::Result<Self> {
        if interval.is_zero() {
            anyhow::bail!("Poll interval must be greater than zero");
        }
        Ok(Self { service, interval })
    }

    /// Start polling; one display update is sent per tick
    ///
    /// The first poll happens immediately. Polling stops when the receiver
    /// is dropped.
    pub fn subscribe(&self) -> mpsc::Receiver<PriceDisplay> {
        let (tx, rx) = mpsc::channel(16);
        let service = Arc::clone(&self.service);
        let period = self.interval;

        tracing::info!(interval_secs = period.as_secs_f64(), "Starting price poller");

        tokio::spawn(async move {
            Self::run_poll_loop(service, period, tx).await;
        });

        rx
    }

    async fn run_poll_loop(
        service: Arc<PriceService>,
        period: Duration,
        tx: mpsc::Sender<PriceDisplay>,
    ) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut state = LastKnownPrice::new();

        loop {
            ticker.tick().await;

            let result = service.get_live_price(false).await;
            tracing::debug!(kind = result.kind(), "Poll cycle complete");

            if tx.send(state.update(result)).await.is_err() {
                tracing::debug!("Display receiver dropped, stopping poller");
                break;
            }
        }
    }
}
