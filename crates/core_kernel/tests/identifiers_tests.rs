//! Tests for the string-backed identifier types

use core_kernel::{IdentifierError, InsuranceId, OrderId, PolicyId, UserId};
use std::collections::HashSet;

mod construction {
    use super::*;

    #[test]
    fn test_new_wraps_fixture_value() {
        let id = PolicyId::new("pol-001");
        assert_eq!(id.as_str(), "pol-001");
    }

    #[test]
    fn test_from_str_and_string_agree() {
        let a = InsuranceId::from("ins-004");
        let b = InsuranceId::from("ins-004".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(InsuranceId::prefix(), "ins");
        assert_eq!(PolicyId::prefix(), "pol");
        assert_eq!(UserId::prefix(), "user");
        assert_eq!(OrderId::prefix(), "ord");
    }
}

mod generation {
    use super::*;

    #[test]
    fn test_generate_produces_unique_ids() {
        let ids: HashSet<UserId> = (0..100).map(|_| UserId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_generate_v7_is_time_ordered() {
        let first = OrderId::generate_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = OrderId::generate_v7();
        assert!(first < second);
    }

    #[test]
    fn test_generated_ids_carry_prefix() {
        assert!(PolicyId::generate().as_str().starts_with("pol-"));
        assert!(UserId::generate().as_str().starts_with("user-"));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id: InsuranceId = "ins-006".parse().unwrap();
        assert_eq!(id.to_string(), "ins-006");
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!("".parse::<UserId>(), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_parse_whitespace_fails() {
        assert!(matches!(
            " user-001".parse::<UserId>(),
            Err(IdentifierError::Whitespace(_))
        ));
    }
}

mod serde_format {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = InsuranceId::new("ins-001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ins-001\"");

        let back: InsuranceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
