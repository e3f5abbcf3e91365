//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_catalog::{CustomOptions, DurationUnit, Insurance};
use domain_cart::{Cart, CartItem};
use domain_policy::PolicyStatus;

use crate::fixtures::{DateFixtures, SEED_CATALOG};

/// Strategy for generating positive USD prices with cent precision
pub fn usd_price_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000i64).prop_map(|cents| Money::new(Decimal::new(cents, 2), Currency::USD))
}

/// Strategy for generating duration units
pub fn duration_unit_strategy() -> impl Strategy<Value = DurationUnit> {
    prop_oneof![
        Just(DurationUnit::Day),
        Just(DurationUnit::Month),
        Just(DurationUnit::Event),
        Just(DurationUnit::Trip),
    ]
}

/// Strategy for generating policy statuses
pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    prop_oneof![
        Just(PolicyStatus::Active),
        Just(PolicyStatus::Expired),
        Just(PolicyStatus::Cancelled),
    ]
}

/// Strategy for picking a seed product
pub fn seed_product_strategy() -> impl Strategy<Value = Insurance> {
    (0..SEED_CATALOG.len()).prop_map(|i| SEED_CATALOG[i].clone())
}

/// Strategy for optional custom options, zero prices included
pub fn custom_options_strategy() -> impl Strategy<Value = Option<CustomOptions>> {
    prop::option::of(
        (
            prop::option::of(1u32..12),
            prop::option::of(prop_oneof![
                Just(Money::zero(Currency::USD)),
                usd_price_strategy(),
            ]),
        )
            .prop_map(|(duration, total_price)| CustomOptions {
                duration,
                total_price,
            }),
    )
}

/// Strategy for a single cart line
pub fn cart_item_strategy() -> impl Strategy<Value = CartItem> {
    (seed_product_strategy(), 1u32..5, custom_options_strategy()).prop_map(
        |(product, quantity, options)| {
            let item = CartItem::new(product, quantity);
            match options {
                Some(options) => item.with_options(options),
                None => item,
            }
        },
    )
}

/// Strategy for a USD cart built from up to `max_adds` additions
pub fn cart_strategy(max_adds: usize) -> impl Strategy<Value = Cart> {
    prop::collection::vec(cart_item_strategy(), 0..=max_adds).prop_map(|items| {
        let mut cart = Cart::new(Currency::USD);
        for item in items {
            cart.add_item(item);
        }
        cart
    })
}

/// Strategy for dates within two years of the fixture purchase day
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (-365i64..365i64).prop_map(|offset| DateFixtures::purchase_day() + Duration::days(offset))
}

/// Strategy for coverage windows as (start, end) with end on or after start
pub fn coverage_window_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..120i64).prop_map(|(start, days)| (start, start + Duration::days(days)))
}

/// Strategy for confirmation text typed into a prompt
///
/// Mixes the exact phrase, near misses and dismissals.
pub fn confirmation_strategy(phrase: &'static str) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(phrase.to_string())),
        Just(Some(phrase.to_lowercase())),
        Just(Some(format!(" {}", phrase))),
        "[A-Za-z ]{0,10}".prop_map(Some),
    ]
}
