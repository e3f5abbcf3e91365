//! Catalog domain tests
//!
//! Covers storefront filtering, category listing, quotes and the in-memory
//! catalog port.

use core_kernel::{Currency, InsuranceId, Money, SimulatedLatency};
use domain_catalog::{
    categories, find_by_id, fixtures::mock_insurances, CatalogFilter, CatalogPort,
    CategorySelector, DurationUnit, InMemoryCatalog, Insurance, ProductIcon, Quote,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn ids(products: &[&Insurance]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

mod filtering {
    use super::*;

    #[test]
    fn test_category_only() {
        let products = mock_insurances();
        let result = CatalogFilter::new("", CategorySelector::category("Viaje")).apply(&products);
        assert_eq!(ids(&result), vec!["ins-001", "ins-006"]);
    }

    #[test]
    fn test_query_matches_description() {
        let products = mock_insurances();
        let result = CatalogFilter::new("ciclistas", CategorySelector::All).apply(&products);
        assert_eq!(ids(&result), vec!["ins-004"]);
    }

    #[test]
    fn test_query_and_category_must_both_match() {
        let products = mock_insurances();
        let result =
            CatalogFilter::new("robo", CategorySelector::category("Movilidad")).apply(&products);
        assert_eq!(ids(&result), vec!["ins-004"]);

        let none =
            CatalogFilter::new("veterinario", CategorySelector::category("Viaje")).apply(&products);
        assert!(none.is_empty());
    }

    #[test]
    fn test_accented_query() {
        let products = mock_insurances();
        let result = CatalogFilter::new("TECNICAS", CategorySelector::All).apply(&products);
        // accents are not folded: "técnicas" does not contain "tecnicas"
        assert!(result.is_empty());

        let result = CatalogFilter::new("TÉCNICAS", CategorySelector::All).apply(&products);
        assert_eq!(ids(&result), vec!["ins-002"]);
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        let products = mock_insurances();
        let result =
            CatalogFilter::new("", CategorySelector::category("Hogar")).apply(&products);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_on_empty_catalog() {
        let result = CatalogFilter::new("viaje", CategorySelector::All).apply(&[]);
        assert!(result.is_empty());
    }
}

mod listing {
    use super::*;

    #[test]
    fn test_categories_in_first_seen_order() {
        let options = categories(&mock_insurances());
        let labels: Vec<String> = options.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            vec!["Todos", "Viaje", "Tecnología", "Entretenimiento", "Movilidad", "Mascotas"]
        );
    }

    #[test]
    fn test_find_by_id() {
        let products = mock_insurances();
        let found = find_by_id(&products, &InsuranceId::new("ins-003")).unwrap();
        assert_eq!(found.name, "Seguro de Eventos");
        assert_eq!(found.icon, ProductIcon::Ticket);
        assert!(find_by_id(&products, &InsuranceId::new("ins-999")).is_none());
    }

    #[test]
    fn test_product_json_uses_storefront_field_names() {
        let product = &mock_insurances()[2];
        let json = serde_json::to_value(product).unwrap();
        assert_eq!(json["shortDescription"], "Asegura tu entrada a conciertos y eventos");
        assert_eq!(json["duration"], "Por evento");
        assert_eq!(json["icon"], "ticket");
    }
}

mod quoting {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_quote() {
        let pets = &mock_insurances()[4];
        let quote = Quote::new(pets, 2).unwrap();
        assert_eq!(quote.unit, DurationUnit::Month);
        assert_eq!(quote.price.amount(), dec!(39.98));
        assert_eq!(quote.total.amount(), quote.price.amount() + quote.tax.amount());
        assert_eq!(quote.describe_duration(), "2 meses");
    }

    #[test]
    fn test_single_unit_quote_equals_base_price() {
        for product in mock_insurances() {
            let quote = Quote::new(&product, 1).unwrap();
            assert_eq!(quote.price, product.base_price);
        }
    }
}

mod port {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_seed_catalog() {
        let catalog = InMemoryCatalog::default();
        let products = catalog.list_insurances().await.unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0].id.as_str(), "ins-001");
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let catalog = InMemoryCatalog::default();
        let err = catalog
            .get_insurance(&InsuranceId::new("ins-404"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_custom_catalog() {
        let product = mock_insurances().remove(5);
        let catalog = InMemoryCatalog::new(vec![product.clone()], SimulatedLatency::NONE);
        let fetched = catalog.get_insurance(&product.id).await.unwrap();
        assert_eq!(fetched, product);
    }
}

fn arbitrary_insurance() -> impl Strategy<Value = Insurance> {
    (
        "[a-z]{3}-[0-9]{3}",
        "[A-Za-z ]{1,20}",
        prop_oneof![Just("Viaje"), Just("Movilidad"), Just("Mascotas")],
        "[A-Za-z ]{0,40}",
        1i64..100_000i64,
    )
        .prop_map(|(id, name, category, description, cents)| Insurance {
            id: InsuranceId::new(id),
            name,
            category: category.to_string(),
            short_description: description.clone(),
            description,
            base_price: Money::new(Decimal::new(cents, 2), Currency::USD),
            duration: DurationUnit::Day,
            coverage: Vec::new(),
            image_url: String::new(),
            icon: ProductIcon::Plane,
        })
}

proptest! {
    #[test]
    fn empty_query_and_all_categories_is_identity(
        products in proptest::collection::vec(arbitrary_insurance(), 1..20)
    ) {
        let result = CatalogFilter::default().apply(&products);
        let expected: Vec<&Insurance> = products.iter().collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn filter_result_is_an_ordered_subsequence(
        products in proptest::collection::vec(arbitrary_insurance(), 0..20),
        query in "[a-z]{0,2}",
    ) {
        let result = CatalogFilter::new(query.clone(), CategorySelector::category("Viaje"))
            .apply(&products);
        let mut cursor = products.iter();
        for found in &result {
            prop_assert!(cursor.any(|p| std::ptr::eq(p, *found)));
            prop_assert_eq!(found.category.as_str(), "Viaje");
        }
    }

    #[test]
    fn quote_total_is_price_times_one_sixteen(
        product in arbitrary_insurance(),
        duration in 1u32..60,
    ) {
        let quote = Quote::new(&product, duration).unwrap();
        let expected = product.base_price.amount() * Decimal::from(duration) * Decimal::new(116, 2);
        prop_assert_eq!(quote.total.amount(), expected.round_dp(4));
    }
}
