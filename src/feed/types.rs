//! Price feed types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A single gold quote captured from one upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// USD per troy ounce equivalent
    pub price: f64,
    /// Absolute change versus the provider's reference value
    pub change: f64,
    /// Percentage change versus the provider's reference value
    pub change_percent: f64,
    /// Label of the provider that produced this quote
    pub source: String,
    /// Local capture time
    pub timestamp: DateTime<Utc>,
}

impl PriceQuote {
    /// Build a quote from a price and the reference value it moved from
    pub fn from_prior(price: f64, prior: f64, source: impl Into<String>) -> Self {
        let change = price - prior;
        Self {
            price,
            change,
            change_percent: percent_of(change, prior),
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build a quote from a price and an already computed change pair
    pub fn with_change(
        price: f64,
        change: f64,
        change_percent: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            price,
            change,
            change_percent,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    /// Reference value the change was measured against
    pub fn prior_price(&self) -> f64 {
        self.price - self.change
    }

    /// Re-base this quote against an external reference close
    ///
    /// Keeps source and capture time; only the change pair is recomputed.
    pub fn versus(&self, reference: f64) -> Self {
        let change = self.price - reference;
        Self {
            change,
            change_percent: percent_of(change, reference),
            ..self.clone()
        }
    }
}

fn percent_of(change: f64, prior: f64) -> f64 {
    if prior == 0.0 || !prior.is_finite() {
        return 0.0;
    }
    change / prior * 100.0
}

/// Why a source produced no quote
///
/// Every variant means "try the next source" to the coordinator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection, TLS or body read failure
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    /// The request did not complete within the bound
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// Body was not JSON
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// A field the adapter needs was absent or had the wrong type
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// A numeric string field did not parse
    #[error("field {field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}
