use chrono::{TimeZone, Utc};
use product_service::lifecycle::ProductSystem;
use product_service::model::{Product, ProductId, ProductUpdate};
use proptest::prelude::*;
use resource_framework::{MergeMode, Resource, ResourceService, ServiceConfig};
use rust_decimal::Decimal;

fn merge_mode() -> impl Strategy<Value = MergeMode> {
    prop_oneof![Just(MergeMode::Replace), Just(MergeMode::Patch)]
}

fn price() -> impl Strategy<Value = Decimal> {
    // Includes zero, negatives and too many fractional digits
    (-1_000i64..1_000_000, 0u32..4).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn update() -> impl Strategy<Value = ProductUpdate> {
    (
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of("[a-z ]{0,20}"),
        proptest::option::of(price()),
        proptest::option::of(prop_oneof!["SKU-[0-9]", Just(String::new())]),
    )
        .prop_map(|(name, description, price, sku)| ProductUpdate {
            name,
            description,
            price,
            sku,
        })
}

fn stored_product() -> Product {
    let mut product = Product::new("Widget", Decimal::new(12345, 2), "SKU-1");
    product.id = Some(ProductId(7));
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    product.audit.stamp_created(at, "alice");
    product
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: a merge never touches the identifier or any audit field.
    #[test]
    fn merge_never_touches_identity_or_audit(update in update(), mode in merge_mode()) {
        let before = stored_product();
        let mut merged = before.clone();
        merged.apply_update(update, mode);

        prop_assert_eq!(merged.id, before.id);
        prop_assert_eq!(&merged.audit, &before.audit);
    }

    /// Property: validation accepts exactly the positive prices with at most two decimals.
    #[test]
    fn price_validation_matches_scale_rule(price in price()) {
        let mut product = stored_product();
        product.price = price;

        let expected = price > Decimal::ZERO && price.normalize().scale() <= 2;
        prop_assert_eq!(product.validate().is_ok(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    })]

    /// Property: after any sequence of updates, creation audit fields are unchanged
    /// and `updated_at` never precedes `created_at`.
    #[test]
    fn audit_creation_fields_are_write_once(
        updates in proptest::collection::vec(update(), 1..6),
        mode in merge_mode(),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let config = ServiceConfig { merge_mode: mode, ..ServiceConfig::default() };
            let system = ProductSystem::new(config);
            let products = &system.product_service;

            let created = products
                .create_product(Product::new("Widget", Decimal::new(12345, 2), "SKU-1"))
                .await
                .unwrap();
            let id = created.id.unwrap();

            for update in updates {
                // Invalid updates are rejected; either way the invariants must hold
                let _ = products.update_product(id, update).await;

                let stored = products.find_by_id(id).await.unwrap();
                assert_eq!(stored.id, Some(id));
                assert_eq!(stored.audit.created_at, created.audit.created_at);
                assert_eq!(stored.audit.created_by, created.audit.created_by);
                assert!(stored.audit.updated_at >= stored.audit.created_at);
            }
        });
    }
}
