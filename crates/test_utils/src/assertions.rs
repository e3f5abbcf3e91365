//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_cart::OrderSummary;
use domain_policy::{Policy, PolicyStatus};

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that `money` shows as `expected` once rounded to cents, e.g. "$95.10"
pub fn assert_displays_as(money: &Money, expected: &str) {
    let shown = money.round_to_currency().to_string();
    assert_eq!(shown, expected, "Money displayed as {}, expected {}", shown, expected);
}

/// Asserts that a summary obeys `total = subtotal + tax` and `tax = 16% of subtotal`
pub fn assert_summary_consistent(summary: &OrderSummary) {
    assert_eq!(
        summary.total,
        summary.subtotal + summary.tax,
        "Total {} is not subtotal {} plus tax {}",
        summary.total,
        summary.subtotal,
        summary.tax
    );
    assert_eq!(
        summary.tax,
        OrderSummary::TAX_RATE.apply(&summary.subtotal),
        "Tax {} is not {} of {}",
        summary.tax,
        OrderSummary::TAX_RATE,
        summary.subtotal
    );
}

/// Asserts that a policy has the given status
pub fn assert_policy_status(policy: &Policy, expected: PolicyStatus) {
    assert_eq!(
        policy.status(),
        expected,
        "Policy {} is {}, expected {}",
        policy.policy_number(),
        policy.status(),
        expected
    );
}

/// Asserts that no policy in `policies` changed status between two snapshots
pub fn assert_statuses_unchanged(before: &[Policy], after: &[Policy]) {
    assert_eq!(before.len(), after.len(), "Policy count changed");
    for (old, new) in before.iter().zip(after) {
        assert_eq!(
            old.status(),
            new.status(),
            "Policy {} moved from {} to {}",
            old.policy_number(),
            old.status(),
            new.status()
        );
    }
}

/// Asserts that a list of Spanish form messages contains one mentioning `needle`
pub fn assert_mentions(messages: &[String], needle: &str) {
    assert!(
        messages.iter().any(|m| m.contains(needle)),
        "No message mentions {:?}: {:?}",
        needle,
        messages
    );
}
