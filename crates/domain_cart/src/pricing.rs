//! Cart pricing
//!
//! Figures are kept at full internal precision so that
//! `total == subtotal + tax` holds exactly; [`OrderSummary::rounded`] gives
//! the values to print.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate, SALES_TAX};

/// Subtotal, tax and total of a set of cart lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Tax rate applied to every order
    pub const TAX_RATE: Rate = SALES_TAX;

    /// Prices a set of line totals expressed in `currency`
    ///
    /// Line totals in other currencies are never produced by [`crate::Cart`];
    /// their amounts are summed as-is.
    pub fn from_lines(currency: Currency, line_totals: impl IntoIterator<Item = Money>) -> Self {
        let subtotal_amount: Decimal = line_totals.into_iter().map(|m| m.amount()).sum();
        let subtotal = Money::new(subtotal_amount, currency);
        let tax = Self::TAX_RATE.apply(&subtotal);
        let total = Money::new(subtotal.amount() + tax.amount(), currency);
        Self { subtotal, tax, total }
    }

    /// Summary of an empty cart
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Each figure rounded to the currency's minor unit, for display
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: self.subtotal.round_to_currency(),
            tax: self.tax.round_to_currency(),
            total: self.total.round_to_currency(),
        }
    }
}
