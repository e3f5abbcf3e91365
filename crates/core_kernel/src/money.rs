//! Money with exact decimal arithmetic
//!
//! Cart lines, tax and totals are summed as `rust_decimal` values so a
//! receipt always adds up to the cent. Amounts keep four decimal places
//! internally; only display rounds to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Currencies a product can be priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    MXN,
}

impl Currency {
    /// Digits after the decimal point when displayed
    pub const MINOR_DIGITS: u32 = 2;

    /// Sign printed in front of an amount
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::MXN => "MX$",
        }
    }

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::MXN => "MXN",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),
}

/// An amount in a given currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Rounds to whole cents, halves away from zero
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(Currency::MINOR_DIGITS, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }

    /// Adds two amounts of the same currency
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Price of `quantity` units at this unit price
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }

    /// Adds up `amounts`, all of which must be in `currency`
    pub fn sum<'a, I>(currency: Currency, amounts: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.digits$}",
            self.currency.symbol(),
            self.round_to_currency().amount,
            digits = Currency::MINOR_DIGITS as usize
        )
    }
}

/// # Panics
///
/// Panics on currency mismatch; use [`Money::checked_add`] when the
/// currencies are not known to agree.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

/// Sales tax charged on every purchase
pub const SALES_TAX: Rate = Rate::new(dec!(0.16));

/// A proportional charge such as a tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(Decimal);

impl Rate {
    /// A rate given as a fraction, 0.16 for 16%
    pub const fn new(fraction: Decimal) -> Self {
        Self(fraction)
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * dec!(100)
    }

    /// The charge this rate levies on `money`
    pub fn apply(&self, money: &Money) -> Money {
        Money::new(money.amount * self.0, money.currency)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_quantity() {
        let m = Money::new(dec!(15.99), Currency::USD);
        assert_eq!(m.times(2).amount(), dec!(31.98));
        assert!(m.times(0).is_zero());
    }

    #[test]
    fn test_round_to_currency_half_up() {
        let m = Money::new(dec!(95.0968), Currency::USD);
        assert_eq!(m.round_to_currency().amount(), dec!(95.10));

        let half = Money::new(dec!(0.125), Currency::USD);
        assert_eq!(half.round_to_currency().amount(), dec!(0.13));
    }

    #[test]
    fn test_sales_tax() {
        let tax = SALES_TAX.apply(&Money::new(dec!(100.00), Currency::USD));
        assert_eq!(tax.amount(), dec!(16.00));
        assert_eq!(SALES_TAX.to_string(), "16%");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn cents(value: i64) -> Money {
        Money::new(Decimal::new(value, 2), Currency::USD)
    }

    proptest! {
        #[test]
        fn money_sum_matches_decimal_sum(
            amounts in proptest::collection::vec(0i64..10_000_000i64, 0..20)
        ) {
            let monies: Vec<Money> = amounts.iter().copied().map(cents).collect();
            let total = Money::sum(Currency::USD, &monies).unwrap();

            let expected: Decimal = monies.iter().map(|m| m.amount()).sum();
            prop_assert_eq!(total.amount(), expected);
        }

        #[test]
        fn money_addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let (ma, mb, mc) = (cents(a), cents(b), cents(c));
            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }
    }
}
