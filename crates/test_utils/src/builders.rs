//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{CoveragePeriod, Currency, PolicyId};
use domain_cart::{Cart, CartItem};
use domain_catalog::{CustomOptions, Insurance, Quote};
use domain_policy::{Policy, PolicyBuilder, PolicyStatus};

use crate::fixtures::{CatalogFixtures, DateFixtures, MoneyFixtures};

/// Builder for policies in a chosen state
pub struct TestPolicyBuilder {
    id: PolicyId,
    product: Insurance,
    status: PolicyStatus,
    start: NaiveDate,
    end: NaiveDate,
    policy_number: String,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// An active seven-day travel policy bought on the fixture purchase day
    pub fn new() -> Self {
        let start = DateFixtures::purchase_day();
        Self {
            id: PolicyId::generate(),
            product: CatalogFixtures::travel(),
            status: PolicyStatus::Active,
            start,
            end: start + chrono::Duration::days(7),
            policy_number: "VES-2025-900-0001".to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = PolicyId::new(id);
        self
    }

    pub fn with_product(mut self, product: Insurance) -> Self {
        self.product = product;
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Coverage from `start` to `end`, both inclusive
    pub fn covering(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    /// Builds the policy
    ///
    /// # Panics
    ///
    /// Panics if the coverage window ends before it starts.
    pub fn build(self) -> Policy {
        let period = CoveragePeriod::new(self.start, self.end).expect("valid coverage window");
        PolicyBuilder::new()
            .id(self.id)
            .insurance(self.product.id.clone(), &self.product.name, &self.product.category)
            .status(self.status)
            .period(period)
            .price(MoneyFixtures::usd(dec!(129.84)))
            .duration(format!("{} días", period.days()))
            .image_url(&self.product.image_url)
            .policy_number(self.policy_number)
            .coverage(self.product.coverage.clone())
            .build()
            .expect("complete policy")
    }
}

/// Builder for carts
pub struct TestCartBuilder {
    cart: Cart,
}

impl Default for TestCartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCartBuilder {
    /// An empty USD cart
    pub fn new() -> Self {
        Self {
            cart: Cart::new(Currency::USD),
        }
    }

    /// Adds `quantity` units at the base price
    pub fn with_item(mut self, product: Insurance, quantity: u32) -> Self {
        self.cart.add_item(CartItem::new(product, quantity));
        self
    }

    /// Adds `quantity` units quoted for `duration` units
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn with_quote(mut self, product: Insurance, duration: u32, quantity: u32) -> Self {
        let quote = Quote::new(&product, duration).expect("non-zero duration");
        self.cart.add_item(CartItem::from_quote(product, &quote, quantity));
        self
    }

    /// Adds `quantity` units with explicit custom options
    pub fn with_options(mut self, product: Insurance, options: CustomOptions, quantity: u32) -> Self {
        self.cart
            .add_item(CartItem::new(product, quantity).with_options(options));
        self
    }

    /// The worked example: travel at 15.99 × 2 plus devices quoted at 50.00
    pub fn worked_example() -> Self {
        Self::new()
            .with_item(CatalogFixtures::travel(), 2)
            .with_options(
                CatalogFixtures::devices(),
                CustomOptions {
                    duration: None,
                    total_price: Some(MoneyFixtures::custom_total()),
                },
                1,
            )
    }

    pub fn build(self) -> Cart {
        self.cart
    }
}
