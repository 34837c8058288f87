//! Plausibility check applied before a quote is cached or returned

use crate::feed::PriceQuote;
use thiserror::Error;

/// Default floor in USD per troy ounce
pub const DEFAULT_MIN_PLAUSIBLE_PRICE: f64 = 1000.0;

/// Why a candidate quote was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Implausible {
    #[error("price is not finite")]
    NotFinite,
    #[error("price {0} is not positive")]
    NotPositive(f64),
    #[error("price {price} is below floor {floor}")]
    BelowFloor { price: f64, floor: f64 },
}

/// Rejects zero, NaN, infinite and implausibly low prices
#[derive(Debug, Clone, Copy)]
pub struct SanityCheck {
    floor: f64,
}

impl SanityCheck {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn check(&self, quote: &PriceQuote) -> Result<(), Implausible> {
        let price = quote.price;
        if !price.is_finite() {
            return Err(Implausible::NotFinite);
        }
        if price <= 0.0 {
            return Err(Implausible::NotPositive(price));
        }
        // Negated so a NaN floor rejects everything
        if !(price > self.floor) {
            return Err(Implausible::BelowFloor {
                price,
                floor: self.floor,
            });
        }
        Ok(())
    }
}

impl Default for SanityCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PLAUSIBLE_PRICE)
    }
}
