//! Policy lifecycle tests
//!
//! Covers confirmed cancellation, dashboard tabs, the expiry sweep and
//! issuance from a placed order.

use chrono::{NaiveDate, Utc};
use core_kernel::{PolicyId, UserId};
use domain_cart::{place_order, Cart, CartItem, PaymentDetails};
use domain_catalog::{fixtures::mock_insurances, Quote};
use domain_policy::{
    cancel_policy, expire_due, fixtures::mock_policies, CancellationOutcome, DeclineReason,
    PolicyEvent, PolicyIssuer, PolicyStatus, StatusCounts, StatusFilter,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn statuses(policies: &[domain_policy::Policy]) -> Vec<PolicyStatus> {
    policies.iter().map(|p| p.status()).collect()
}

mod cancellation {
    use super::*;

    #[test]
    fn test_exact_confirmation_cancels_one_policy() {
        let mut policies = mock_policies();
        let id = PolicyId::new("pol-002");

        let outcome = cancel_policy(&mut policies, &id, Some("CANCELAR"), Utc::now());

        assert_eq!(
            outcome,
            CancellationOutcome::Confirmed {
                policy_id: id,
                policy_number: "VES-2025-002-4521".to_string(),
            }
        );
        assert_eq!(
            statuses(&policies),
            vec![PolicyStatus::Active, PolicyStatus::Cancelled, PolicyStatus::Active]
        );
    }

    #[test]
    fn test_wrong_confirmation_changes_nothing() {
        let mut policies = mock_policies();
        let before = policies.clone();

        let outcome = cancel_policy(
            &mut policies,
            &PolicyId::new("pol-001"),
            Some("cancelar"),
            Utc::now(),
        );

        assert_eq!(outcome, CancellationOutcome::Declined(DeclineReason::WrongConfirmation));
        assert_eq!(policies, before);
    }

    #[test]
    fn test_dismissed_prompt_changes_nothing() {
        let mut policies = mock_policies();
        let outcome = cancel_policy(&mut policies, &PolicyId::new("pol-001"), None, Utc::now());

        assert_eq!(outcome, CancellationOutcome::Declined(DeclineReason::Dismissed));
        assert!(policies.iter().all(|p| p.is_active()));
    }

    #[test]
    fn test_second_attempt_is_not_cancellable() {
        let mut policies = mock_policies();
        let id = PolicyId::new("pol-001");

        assert!(cancel_policy(&mut policies, &id, Some("CANCELAR"), Utc::now()).is_confirmed());
        let second = cancel_policy(&mut policies, &id, Some("CANCELAR"), Utc::now());

        assert_eq!(
            second,
            CancellationOutcome::NotCancellable {
                status: PolicyStatus::Cancelled
            }
        );
        assert_eq!(policies[0].take_events().len(), 1);
    }

    #[test]
    fn test_unknown_policy_not_found() {
        let mut policies = mock_policies();
        let outcome =
            cancel_policy(&mut policies, &PolicyId::new("pol-999"), Some("CANCELAR"), Utc::now());
        assert_eq!(outcome, CancellationOutcome::NotFound);
    }

    #[test]
    fn test_prompt_names_policy() {
        let policies = mock_policies();
        let prompt = domain_policy::cancellation::confirmation_prompt(&policies[0]);
        assert!(prompt.contains("VES-2025-001-7892"));
        assert!(prompt.contains("CANCELAR"));
    }
}

mod portfolio {
    use super::*;

    #[test]
    fn test_all_tab_keeps_order() {
        let policies = mock_policies();
        let ids: Vec<_> = StatusFilter::All
            .apply(&policies)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["pol-001", "pol-002", "pol-003"]);
    }

    #[test]
    fn test_expire_due_skips_cancelled() {
        let mut policies = mock_policies();
        cancel_policy(&mut policies, &PolicyId::new("pol-003"), Some("CANCELAR"), Utc::now());

        let expired = expire_due(&mut policies, date(2025, 1, 23), Utc::now());

        assert_eq!(expired, vec![PolicyId::new("pol-001")]);
        assert_eq!(
            statuses(&policies),
            vec![PolicyStatus::Expired, PolicyStatus::Active, PolicyStatus::Cancelled]
        );
    }

    #[test]
    fn test_expire_due_records_event() {
        let mut policies = mock_policies();
        expire_due(&mut policies, date(2025, 3, 1), Utc::now());

        let events: Vec<PolicyEvent> = policies.iter_mut().flat_map(|p| p.take_events()).collect();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.event_type() == "PolicyExpired"));
    }

    #[test]
    fn test_end_date_itself_still_covered() {
        let mut policies = mock_policies();
        let expired = expire_due(&mut policies, date(2025, 1, 15), Utc::now());
        assert!(expired.is_empty());
    }
}

mod issuance {
    use super::*;

    #[test]
    fn test_order_issues_one_policy_per_unit() {
        let products = mock_insurances();
        let travel = products[0].clone();
        let quote = Quote::new(&travel, 7).unwrap();

        let mut cart = Cart::default();
        cart.add_item(CartItem::from_quote(travel, &quote, 1));
        cart.add_item(CartItem::new(products[5].clone(), 2));

        let card = PaymentDetails::new("4111111111111111", "Ana García", "1230", "123");
        let order = place_order(&cart, &card, Some(UserId::new("user-001")), date(2025, 5, 2)).unwrap();

        let mut issuer = PolicyIssuer::starting_at(4);
        let mut policies = issuer.issue_order(&order, &products, Utc::now()).unwrap();

        assert_eq!(policies.len(), 3);
        assert_eq!(policies[0].duration(), "7 días");
        assert_eq!(policies[0].end_date(), date(2025, 5, 9));
        assert!(policies[0].policy_number().starts_with("VES-2025-004-"));
        assert_eq!(policies[1].duration(), "1 viaje");
        assert_eq!(policies[1].end_date(), date(2025, 6, 1));
        assert!(policies[2].policy_number().starts_with("VES-2025-006-"));
        assert_eq!(issuer.next_sequence(), 7);

        let events = policies[0].take_events();
        assert!(matches!(events.as_slice(), [PolicyEvent::PolicyIssued { .. }]));
    }
}

fn arb_confirmation() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("CANCELAR".to_string())),
        "[A-Za-z ]{0,10}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn prop_cancellation_touches_at_most_one_policy(
        index in 0usize..4,
        confirmation in arb_confirmation(),
    ) {
        let mut policies = mock_policies();
        let id = PolicyId::new(format!("pol-{:03}", index + 1));
        let outcome = cancel_policy(&mut policies, &id, confirmation.as_deref(), Utc::now());

        let cancelled = policies.iter().filter(|p| p.status() == PolicyStatus::Cancelled).count();
        if confirmation.as_deref() == Some("CANCELAR") && index < 3 {
            prop_assert!(outcome.is_confirmed());
            prop_assert_eq!(cancelled, 1);
        } else {
            prop_assert!(!outcome.is_confirmed());
            prop_assert_eq!(cancelled, 0);
        }
    }

    #[test]
    fn prop_tab_counts_partition(cancel_mask in prop::collection::vec(any::<bool>(), 3), day in 0u32..90) {
        let mut policies = mock_policies();
        for (policy, cancel) in policies.iter_mut().zip(cancel_mask) {
            if cancel {
                policy.cancel(Utc::now()).unwrap();
            }
        }
        let today = date(2025, 1, 1) + chrono::Days::new(u64::from(day));
        let cancelled_before = policies.iter().filter(|p| p.status() == PolicyStatus::Cancelled).count();
        expire_due(&mut policies, today, Utc::now());

        let counts = StatusCounts::of(&policies);
        prop_assert_eq!(counts.active + counts.inactive, counts.all);
        prop_assert_eq!(counts.active, StatusFilter::Active.apply(&policies).len());
        let cancelled_after = policies.iter().filter(|p| p.status() == PolicyStatus::Cancelled).count();
        prop_assert_eq!(cancelled_before, cancelled_after);
    }
}
