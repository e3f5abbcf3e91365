//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the marketplace.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, InsuranceId, Money, UserId};
use domain_cart::PaymentDetails;
use domain_catalog::fixtures::mock_insurances;
use domain_catalog::Insurance;
use domain_user::{RegistrationForm, Role, UserRecord};

/// The seed catalog, built once per test binary
pub static SEED_CATALOG: Lazy<Vec<Insurance>> = Lazy::new(mock_insurances);

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A USD amount
    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A quoted custom price for the cart example (B at 50.00)
    pub fn custom_total() -> Money {
        Money::new(dec!(50.00), Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// A purchase day inside a 31-day month
    pub fn purchase_day() -> NaiveDate {
        Self::ymd(2025, 3, 10)
    }

    /// A purchase day at the end of January, for month clamping
    pub fn month_end() -> NaiveDate {
        Self::ymd(2025, 1, 31)
    }

    /// Builds a date, panicking on an impossible one
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }
}

/// Fixture for catalog products
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// Seed product by id
    pub fn product(id: &str) -> Insurance {
        let id = InsuranceId::new(id);
        SEED_CATALOG
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .expect("seed product")
    }

    /// ins-001, 15.99 per day
    pub fn travel() -> Insurance {
        Self::product("ins-001")
    }

    /// ins-002, 9.99 per month
    pub fn devices() -> Insurance {
        Self::product("ins-002")
    }

    /// ins-003, 5.99 per event
    pub fn event() -> Insurance {
        Self::product("ins-003")
    }

    /// ins-006, 7.99 per trip
    pub fn luggage() -> Insurance {
        Self::product("ins-006")
    }
}

/// Fixture for card payments
pub struct PaymentFixtures;

impl PaymentFixtures {
    /// A card that passes validation on `today`
    pub fn valid_card(today: NaiveDate) -> PaymentDetails {
        let expiry = format!("12/{:02}", (today.year() + 2) % 100);
        PaymentDetails::new("4111 1111 1111 1111", "Usuario Demo", &expiry, "123")
    }

    /// A card that fails every check
    pub fn broken_card() -> PaymentDetails {
        PaymentDetails::new("4111", "", "13/20", "1")
    }
}

/// Fixture for accounts and directory entries
pub struct UserFixtures;

impl UserFixtures {
    /// A sign-up form that passes every rule
    pub fn registration() -> RegistrationForm {
        RegistrationForm {
            name: "Lucía Martín".to_string(),
            email: "lucia.martin@email.com".to_string(),
            mobile: "+34 611 222 333".to_string(),
            password: "secreto1".to_string(),
            confirm_password: "secreto1".to_string(),
            accept_terms: true,
            accept_privacy: true,
        }
    }

    /// A directory entry with a generated name and email
    pub fn record(id: &str, role: Role) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            mobile: "+34611000000".to_string(),
            role,
            email_confirmed: true,
            created_at: Utc
                .with_ymd_and_hms(2025, 2, 1, 9, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
            active_policy_count: 0,
        }
    }
}
