//! Issuing policies from a placed order
//!
//! Each unit bought becomes its own policy, starting on the order date.
//! The coverage window follows the product's duration unit: days and
//! months are calendar spans, while per-event and per-trip products get a
//! fixed window for each unit bought.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use core_kernel::{CoveragePeriod, Money, SALES_TAX};
use domain_cart::{Order, OrderLine, MAX_LINE_QUANTITY};
use domain_catalog::{find_by_id, DurationUnit, Insurance};

use crate::error::PolicyError;
use crate::policy::{Policy, PolicyBuilder};

/// Days of cover granted per event or trip bought
pub const EVENT_WINDOW_DAYS: u32 = 30;

/// Prefix of every policy number
pub const POLICY_NUMBER_PREFIX: &str = "VES";

/// Coverage window for `count` units of `unit` starting on `start`
pub fn coverage_period(
    unit: DurationUnit,
    count: u32,
    start: NaiveDate,
) -> Result<CoveragePeriod, PolicyError> {
    let period = match unit {
        DurationUnit::Day => CoveragePeriod::for_days(start, count)?,
        DurationUnit::Month => CoveragePeriod::for_months(start, count)?,
        DurationUnit::Event | DurationUnit::Trip => {
            CoveragePeriod::for_days(start, count.saturating_mul(EVENT_WINDOW_DAYS))?
        }
    };
    Ok(period)
}

/// Price paid for one policy: the unit price plus sales tax
pub fn price_with_tax(unit_price: Money) -> Money {
    let tax = SALES_TAX.apply(&unit_price);
    Money::new(unit_price.amount() + tax.amount(), unit_price.currency()).round_to_currency()
}

/// Hands out policy numbers and builds policies from order lines
///
/// Numbers look like `VES-2025-004-1234`: issue year, a running sequence
/// and a random four-digit suffix.
#[derive(Debug, Clone)]
pub struct PolicyIssuer {
    next_sequence: u32,
}

impl Default for PolicyIssuer {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl PolicyIssuer {
    /// Creates an issuer whose first policy gets sequence `next_sequence`
    pub fn starting_at(next_sequence: u32) -> Self {
        Self { next_sequence }
    }

    /// Sequence the next policy number will use
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// Allocates the next policy number for `year`
    pub fn next_number(&mut self, year: i32) -> String {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        let suffix = Uuid::new_v4().as_u128() % 10_000;
        format!("{}-{}-{:03}-{:04}", POLICY_NUMBER_PREFIX, year, sequence, suffix)
    }

    /// Issues `line.quantity` policies for one order line
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Validation`] if the line is over
    /// [`MAX_LINE_QUANTITY`] units.
    pub fn issue_line(
        &mut self,
        line: &OrderLine,
        product: &Insurance,
        start: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<Policy>, PolicyError> {
        if line.quantity > MAX_LINE_QUANTITY {
            return Err(PolicyError::validation(format!(
                "{} units of {} exceed the limit of {}",
                line.quantity, line.insurance_id, MAX_LINE_QUANTITY
            )));
        }
        let period = coverage_period(line.duration_unit, line.duration, start)?;
        let price = price_with_tax(line.unit_price);
        let label = line.duration_unit.describe(line.duration);

        (0..line.quantity)
            .map(|_| {
                PolicyBuilder::new()
                    .insurance(line.insurance_id.clone(), &line.insurance_name, &line.category)
                    .period(period)
                    .price(price)
                    .duration(label.clone())
                    .image_url(&product.image_url)
                    .policy_number(self.next_number(start.year()))
                    .coverage(product.coverage.clone())
                    .issue(now)
            })
            .collect()
    }

    /// Issues policies for every line of `order`
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Validation`] if a line refers to a product
    /// missing from `catalog`.
    #[instrument(skip(self, order, catalog), fields(order_id = %order.id))]
    pub fn issue_order(
        &mut self,
        order: &Order,
        catalog: &[Insurance],
        now: DateTime<Utc>,
    ) -> Result<Vec<Policy>, PolicyError> {
        let mut policies = Vec::new();
        for line in &order.lines {
            let product = find_by_id(catalog, &line.insurance_id).ok_or_else(|| {
                PolicyError::validation(format!("unknown product {}", line.insurance_id))
            })?;
            policies.extend(self.issue_line(line, product, order.placed_on, now)?);
        }
        info!(count = policies.len(), "Issued policies for order");
        Ok(policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_coverage_windows() {
        let start = date(2025, 1, 31);
        assert_eq!(coverage_period(DurationUnit::Day, 7, start).unwrap().end, date(2025, 2, 7));
        assert_eq!(coverage_period(DurationUnit::Month, 1, start).unwrap().end, date(2025, 2, 28));
        assert_eq!(coverage_period(DurationUnit::Trip, 2, start).unwrap().days(), 60);
    }

    #[test]
    fn test_policy_number_format() {
        let mut issuer = PolicyIssuer::starting_at(4);
        let number = issuer.next_number(2025);
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "VES");
        assert_eq!(parts[1], "2025");
        assert_eq!(parts[2], "004");
        assert_eq!(parts[3].len(), 4);
        assert!(parts[3].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(issuer.next_sequence(), 5);
    }

    #[test]
    fn test_oversized_line_refused_before_issuing() {
        let product = domain_catalog::fixtures::mock_insurances().remove(0);
        let line = OrderLine {
            insurance_id: product.id.clone(),
            insurance_name: product.name.clone(),
            category: product.category.clone(),
            quantity: u32::MAX,
            duration: 1,
            duration_unit: product.duration,
            unit_price: product.base_price,
            line_total: product.base_price,
        };
        let mut issuer = PolicyIssuer::starting_at(4);

        let result = issuer.issue_line(&line, &product, date(2025, 3, 10), Utc::now());
        assert!(matches!(result, Err(PolicyError::Validation(_))));
        assert_eq!(issuer.next_sequence(), 4);
    }

    #[test]
    fn test_price_includes_tax() {
        let price = price_with_tax(Money::new(dec!(9.99), core_kernel::Currency::USD));
        assert_eq!(price.amount(), dec!(11.59));
    }
}
