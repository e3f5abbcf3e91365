//! Property tests over generated carts, policies and sessions

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::PolicyId;
use domain_policy::{cancel_policy, expire_due, PolicyStatus, CANCEL_CONFIRMATION};
use domain_user::{Role, User};
use interface_app::{guard, Session, View};
use test_utils::{
    assert_displays_as, assert_mentions, assert_policy_status, assert_statuses_unchanged,
    assert_summary_consistent, cart_strategy, confirmation_strategy, coverage_window_strategy,
    date_strategy, policy_status_strategy, PaymentFixtures, TestCartBuilder, TestPolicyBuilder,
};

fn view_strategy() -> impl Strategy<Value = View> {
    prop_oneof![
        Just(View::Home),
        Just(View::Login),
        Just(View::Register),
        Just(View::Dashboard),
        Just(View::Detail),
        Just(View::Cart),
        Just(View::Checkout),
        Just(View::ForgotPassword),
        Just(View::Admin),
        Just(View::Privacy),
        Just(View::Terms),
        Just(View::Cookies),
    ]
}

fn session_user_strategy() -> impl Strategy<Value = Option<User>> {
    prop_oneof![Just(None), Just(Some(Role::Usuario)), Just(Some(Role::Administrador))]
        .prop_map(|role: Option<Role>| {
            role.map(|role| User {
                id: "user-001".into(),
                email: "demo@vesta.com".to_string(),
                name: "Usuario Demo".to_string(),
                token: "mock-jwt-token-1".to_string(),
                role: Some(role),
            })
        })
}

#[test]
fn test_worked_example_totals() {
    let summary = TestCartBuilder::worked_example().build().summary();
    assert_summary_consistent(&summary);
    assert_displays_as(&summary.subtotal, "$81.98");
    assert_displays_as(&summary.tax, "$13.12");
    assert_displays_as(&summary.total, "$95.10");
}

#[test]
fn test_broken_card_reports_each_field() {
    let problems = PaymentFixtures::broken_card().validate(Utc::now().date_naive());
    assert_mentions(&problems, "16");
    assert_mentions(&problems, "CVV");
}

proptest! {
    #[test]
    fn prop_generated_carts_price_consistently(cart in cart_strategy(8)) {
        let summary = cart.summary();
        assert_summary_consistent(&summary);
        prop_assert_eq!(summary.total.amount(), summary.subtotal.amount() * dec!(1.16));
    }

    #[test]
    fn prop_guard_never_opens_admin_for_non_admins(
        view in view_strategy(),
        user in session_user_strategy(),
    ) {
        let landed = guard(view, user.as_ref());
        let is_admin = user.as_ref().is_some_and(User::is_admin);

        if landed == View::Admin {
            prop_assert!(is_admin);
        }
        if user.is_none() {
            prop_assert!(!landed.requires_session());
        }
    }

    #[test]
    fn prop_sign_out_always_empties_cart(cart in cart_strategy(4)) {
        let mut session = Session::default();
        *session.cart_mut() = cart;
        session.sign_out();

        prop_assert!(session.cart().is_empty());
        prop_assert_eq!(session.view(), View::Home);
    }

    #[test]
    fn prop_only_exact_phrase_cancels(
        status in policy_status_strategy(),
        typed in confirmation_strategy(CANCEL_CONFIRMATION),
    ) {
        let mut policies = vec![TestPolicyBuilder::new().with_id("pol-100").with_status(status).build()];
        let outcome = cancel_policy(&mut policies, &PolicyId::new("pol-100"), typed.as_deref(), Utc::now());

        let exact = typed.as_deref() == Some(CANCEL_CONFIRMATION);
        prop_assert_eq!(outcome.is_confirmed(), exact && status == PolicyStatus::Active);
        if outcome.is_confirmed() {
            assert_policy_status(&policies[0], PolicyStatus::Cancelled);
        } else {
            assert_policy_status(&policies[0], status);
        }
    }

    #[test]
    fn prop_expiry_leaves_cancelled_alone(
        window in coverage_window_strategy(),
        today in date_strategy(),
    ) {
        let (start, end) = window;
        let mut policies = vec![
            TestPolicyBuilder::new().covering(start, end).with_status(PolicyStatus::Cancelled).build(),
            TestPolicyBuilder::new().covering(start, end).build(),
        ];
        let cancelled_before = vec![policies[0].clone()];

        let expired = expire_due(&mut policies, today, Utc::now());

        assert_statuses_unchanged(&cancelled_before, &policies[..1]);
        prop_assert_eq!(expired.len(), usize::from(today > end));
    }
}
