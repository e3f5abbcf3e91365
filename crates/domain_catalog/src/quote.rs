//! Duration quotes
//!
//! The detail page lets a customer pick how many duration units to buy
//! (days, months, events, trips). The quote multiplies the base price by
//! that count and previews the tax; the resulting [`CustomOptions`] travel
//! with the cart item so the cart charges the quoted price.

use serde::{Deserialize, Serialize};

use core_kernel::{InsuranceId, Money, SALES_TAX};

use crate::error::CatalogError;
use crate::insurance::{DurationUnit, Insurance};

/// Per-cart-item override of duration and price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOptions {
    /// Number of duration units bought
    pub duration: Option<u32>,
    /// Precomputed price for the whole duration, per item
    pub total_price: Option<Money>,
}

impl CustomOptions {
    /// Duration count, defaulting to a single unit
    pub fn duration_or_default(&self) -> u32 {
        self.duration.unwrap_or(1)
    }
}

/// Price preview for a product and a chosen duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub insurance_id: InsuranceId,
    pub unit: DurationUnit,
    pub duration: u32,
    /// `base_price × duration`
    pub price: Money,
    /// Tax on `price`
    pub tax: Money,
    /// `price + tax`
    pub total: Money,
}

impl Quote {
    /// Quotes `insurance` for `duration` units
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDuration`] when `duration` is zero.
    pub fn new(insurance: &Insurance, duration: u32) -> Result<Self, CatalogError> {
        if duration == 0 {
            return Err(CatalogError::InvalidDuration(duration));
        }

        let price = insurance.base_price.times(duration);
        let tax = SALES_TAX.apply(&price);
        let total = Money::new(price.amount() + tax.amount(), price.currency());

        Ok(Self {
            insurance_id: insurance.id.clone(),
            unit: insurance.duration,
            duration,
            price,
            tax,
            total,
        })
    }

    /// Options to attach to the cart item for this quote
    pub fn custom_options(&self) -> CustomOptions {
        CustomOptions {
            duration: Some(self.duration),
            total_price: Some(self.price),
        }
    }

    /// "7 días", "1 mes", ...
    pub fn describe_duration(&self) -> String {
        self.unit.describe(self.duration)
    }
}
