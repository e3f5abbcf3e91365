//! User domain tests
//!
//! Covers registration rules, mock sign-in, directory search and the
//! deletion guards, plus the in-memory port.

use chrono::Utc;
use core_kernel::{SimulatedLatency, UserId};
use domain_user::{
    delete_user, fixtures::mock_users, DeletionOutcome, DirectoryQuery, DirectoryStats,
    InMemoryUsers, RegistrationForm, Role, RoleFilter, UserError, UserPort, UserRecord,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

fn valid_form() -> RegistrationForm {
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

fn generated_record(index: usize, role: Role, confirmed: bool) -> UserRecord {
    UserRecord {
        id: UserId::new(format!("user-{:03}", 100 + index)),
        full_name: Name().fake(),
        email: SafeEmail().fake(),
        mobile: format!("+346{:08}", index),
        role,
        email_confirmed: confirmed,
        created_at: Utc::now(),
        active_policy_count: 0,
    }
}

mod registration {
    use super::*;

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().check().is_ok());
    }

    #[test]
    fn test_password_rules() {
        let mut form = valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "abd".to_string();

        let problems = form.problems();
        assert_eq!(
            problems,
            vec![
                "La contraseña debe tener al menos 6 caracteres".to_string(),
                "Las contraseñas no coinciden".to_string(),
            ]
        );
    }

    #[test]
    fn test_six_character_password_accepted() {
        let mut form = valid_form();
        form.password = "abcdef".to_string();
        form.confirm_password = "abcdef".to_string();
        assert!(form.check().is_ok());
    }

    #[test]
    fn test_consent_required() {
        let mut form = valid_form();
        form.accept_privacy = false;
        let err = form.check().unwrap_err();
        assert_eq!(err.messages().len(), 1);
        assert!(err.messages()[0].contains("Política de Privacidad"));
    }

    #[test]
    fn test_every_problem_reported_in_form_order() {
        let form = RegistrationForm {
            name: String::new(),
            email: "not-an-email".to_string(),
            mobile: "912345678".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            accept_terms: false,
            accept_privacy: true,
        };
        let problems = form.problems();
        assert_eq!(problems.len(), 5);
        assert!(problems[0].contains("nombre"));
        assert!(problems[1].contains("correo"));
        assert!(problems[2].contains("móvil"));
        assert!(problems[3].contains("contraseña"));
    }

    #[test]
    fn test_name_length_limit() {
        let mut form = valid_form();
        form.name = "a".repeat(51);
        assert!(form.check().is_err());
        form.name = "ñ".repeat(50);
        assert!(form.check().is_ok());
    }
}

mod directory {
    use super::*;

    #[test]
    fn test_search_name_case_insensitive() {
        let records = mock_users();
        let hits = DirectoryQuery::new("GARCÍA", RoleFilter::All).apply(&records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].email, "maria.garcia@email.com");
    }

    #[test]
    fn test_role_filter_combines_with_search() {
        let records = mock_users();
        let admins = DirectoryQuery::new("vesta", RoleFilter::Only(Role::Administrador)).apply(&records);
        let users = DirectoryQuery::new("vesta", RoleFilter::Only(Role::Usuario)).apply(&records);

        assert_eq!(admins.len(), 1);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.as_str(), "user-001");
    }

    #[test]
    fn test_wrong_confirmation_declines() {
        let mut records = mock_users();
        let outcome = delete_user(&mut records, &UserId::new("user-003"), Some("eliminar"));
        assert_eq!(outcome, DeletionOutcome::Declined);
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_active_policies_block_deletion() {
        let mut records = mock_users();
        let outcome = delete_user(&mut records, &UserId::new("user-001"), Some("ELIMINAR"));
        assert_eq!(outcome, DeletionOutcome::HasActivePolicies { count: 3 });
        assert!(outcome.message().contains('3'));
    }

    #[test]
    fn test_plain_user_deleted() {
        let mut records = mock_users();
        let outcome = delete_user(&mut records, &UserId::new("user-004"), Some("ELIMINAR"));
        assert!(outcome.is_deleted());
        assert_eq!(DirectoryStats::of(&records).total, 3);
    }

    #[test]
    fn test_admin_deletable_when_another_exists() {
        let mut records = mock_users();
        records.push(generated_record(1, Role::Administrador, true));

        let outcome = delete_user(&mut records, &UserId::new("user-002"), Some("ELIMINAR"));
        assert!(outcome.is_deleted());
        assert_eq!(DirectoryStats::of(&records).administrators, 1);
    }

    #[test]
    fn test_unknown_user_not_found() {
        let mut records = mock_users();
        let outcome = delete_user(&mut records, &UserId::new("user-999"), Some("ELIMINAR"));
        assert_eq!(outcome, DeletionOutcome::NotFound);
    }
}

mod port {
    use super::*;

    #[tokio::test]
    async fn test_login_and_bad_credentials() {
        let port = InMemoryUsers::default();
        let user = port.login("demo@vesta.com", "demo123").await.unwrap();
        assert_eq!(user.id.as_str(), "user-001");
        assert!(user.token.starts_with("mock-jwt-token-"));

        let err = port.login("demo@vesta.com", "wrong").await.unwrap_err();
        assert!(matches!(err, core_kernel::PortError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_register_adds_directory_entry() {
        let port = InMemoryUsers::default();
        let user = port.register(&valid_form()).await.unwrap();

        let record = port.get_user(&user.id).await.unwrap();
        assert_eq!(record.mobile, "+34611222333");
        assert!(!record.email_confirmed);
        assert_eq!(port.stats().await.unwrap().total, 5);

        let again = port.register(&valid_form()).await.unwrap_err();
        assert!(matches!(again, core_kernel::PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_after_policy_count_refresh() {
        let port = InMemoryUsers::seeded(SimulatedLatency::NONE);
        let demo = UserId::new("user-001");

        let blocked = port.delete_user(&demo, Some("ELIMINAR")).await.unwrap();
        assert_eq!(blocked, DeletionOutcome::HasActivePolicies { count: 3 });

        port.set_active_policy_count(&demo, 0).await.unwrap();
        let deleted = port.delete_user(&demo, Some("ELIMINAR")).await.unwrap();
        assert!(deleted.is_deleted());
        assert!(port.get_user(&demo).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_user_cannot_sign_in() {
        let port = InMemoryUsers::default();
        let user = port.register(&valid_form()).await.unwrap();

        let outcome = port.delete_user(&user.id, Some("ELIMINAR")).await.unwrap();
        assert!(outcome.is_deleted());

        let err = port.login(&valid_form().email, &valid_form().password).await.unwrap_err();
        assert!(matches!(err, core_kernel::PortError::Unauthorized { .. }));
        assert!(port.get_user(&user.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_declined_deletion_keeps_sign_in() {
        let port = InMemoryUsers::default();
        let user = port.register(&valid_form()).await.unwrap();

        let outcome = port.delete_user(&user.id, Some("eliminar")).await.unwrap();
        assert!(!outcome.is_deleted());
        assert!(port.login(&valid_form().email, &valid_form().password).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_users_filters() {
        let port = InMemoryUsers::default();
        let admins = port
            .list_users(&DirectoryQuery::new("", RoleFilter::Only(Role::Administrador)))
            .await
            .unwrap();
        assert_eq!(admins.len(), 1);
    }

    #[test]
    fn test_user_error_maps_to_port_error() {
        let port_error: core_kernel::PortError = UserError::not_found("user-9").into();
        assert!(port_error.is_not_found());
    }
}

fn arb_directory() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 1..12)
}

fn build(flags: &[(bool, bool)]) -> Vec<UserRecord> {
    flags
        .iter()
        .enumerate()
        .map(|(i, (admin, confirmed))| {
            let role = if *admin { Role::Administrador } else { Role::Usuario };
            generated_record(i, role, *confirmed)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_last_admin_never_deleted(flags in arb_directory(), target in 0usize..12) {
        let mut records = build(&flags);
        let admins_before = DirectoryStats::of(&records).administrators;
        let id = UserId::new(format!("user-{:03}", 100 + target));

        let outcome = delete_user(&mut records, &id, Some("ELIMINAR"));

        if admins_before >= 1 {
            prop_assert!(DirectoryStats::of(&records).administrators >= 1);
        }
        if outcome == DeletionOutcome::LastAdministrator {
            prop_assert_eq!(admins_before, 1);
        }
    }

    #[test]
    fn prop_role_filters_partition(flags in arb_directory()) {
        let records = build(&flags);
        let admins = DirectoryQuery::new("", RoleFilter::Only(Role::Administrador)).apply(&records).len();
        let users = DirectoryQuery::new("", RoleFilter::Only(Role::Usuario)).apply(&records).len();
        let all = DirectoryQuery::default().apply(&records).len();

        prop_assert_eq!(admins + users, all);
        prop_assert_eq!(admins, DirectoryStats::of(&records).administrators);
    }

    #[test]
    fn prop_mobile_rule(digits in "[0-9]{9}") {
        let expected = digits.starts_with('6') || digits.starts_with('7');
        prop_assert_eq!(domain_user::is_spanish_mobile(&digits), expected);
        prop_assert_eq!(domain_user::is_spanish_mobile(&format!("+34{}", digits)), expected);
    }
}
