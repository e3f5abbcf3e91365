//! Policies held by the demo account at launch

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CoveragePeriod, Currency, Money};
use domain_catalog::{fixtures::mock_insurances, Insurance};

use crate::policy::{Policy, PolicyBuilder};

/// Sequence the next issued policy number should continue from
pub const NEXT_POLICY_SEQUENCE: u32 = 4;

fn policy(
    id: &str,
    product: &Insurance,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    price: Decimal,
    duration: &str,
    policy_number: &str,
) -> Option<Policy> {
    let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2)?;
    let end = NaiveDate::from_ymd_opt(end.0, end.1, end.2)?;
    PolicyBuilder::new()
        .id(id)
        .insurance(product.id.clone(), &product.name, &product.category)
        .period(CoveragePeriod::new(start, end).ok()?)
        .price(Money::new(price, Currency::USD))
        .duration(duration)
        .image_url(&product.image_url)
        .policy_number(policy_number)
        .coverage(product.coverage.clone())
        .build()
        .ok()
}

/// pol-001 (travel), pol-002 (devices) and pol-003 (pets), all active
pub fn mock_policies() -> Vec<Policy> {
    let products = mock_insurances();
    let travel = &products[0];
    let devices = &products[1];
    let pets = &products[4];

    [
        policy(
            "pol-001",
            travel,
            (2025, 1, 15),
            (2025, 1, 22),
            dec!(111.84),
            "7 días",
            "VES-2025-001-7892",
        ),
        policy(
            "pol-002",
            devices,
            (2025, 1, 1),
            (2025, 2, 1),
            dec!(11.59),
            "1 mes",
            "VES-2025-002-4521",
        ),
        policy(
            "pol-003",
            pets,
            (2024, 12, 15),
            (2025, 1, 15),
            dec!(23.18),
            "1 mes",
            "VES-2024-003-9834",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
