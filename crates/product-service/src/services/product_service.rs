//! # Product Service
//!
//! Provides the product-specific entry points on top of a
//! `LifecycleService<Product>`. Reads and deletes come from
//! [`ResourceService`]; creates and updates are declared here so that each call
//! carries the product fields in its span.
use crate::model::{Product, ProductId, ProductUpdate};
use resource_framework::{LifecycleService, ResourceService, ServiceError};
use tracing::{debug, instrument};

/// Service for managing products.
#[derive(Clone)]
pub struct ProductService {
    inner: LifecycleService<Product>,
}

impl ProductService {
    pub fn new(inner: LifecycleService<Product>) -> Self {
        Self { inner }
    }

    /// Persists a new product. Fails with `Conflict` if the SKU is taken.
    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn create_product(&self, product: Product) -> Result<Product, ServiceError> {
        debug!("Sending request");
        self.inner.create(product).await
    }

    /// Merges `update` onto the stored product according to the configured merge mode.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ServiceError> {
        debug!("Sending request");
        self.inner.update(id, update).await
    }
}

impl ResourceService<Product> for ProductService {
    fn lifecycle(&self) -> &LifecycleService<Product> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::{create_mock_store, expect_find_by_id, expect_save, MockStore};
    use resource_framework::{AuditStamper, MergeMode, StoreError};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn service_over(store: resource_framework::StoreClient<Product>) -> ProductService {
        ProductService::new(LifecycleService::new(
            Arc::new(store),
            AuditStamper::system("system"),
            MergeMode::Replace,
        ))
    }

    fn widget() -> Product {
        Product::new("Widget", Decimal::new(12345, 2), "SKU-1")
    }

    #[tokio::test]
    async fn test_update_missing_product_never_saves() {
        let mut mock = MockStore::<Product>::new();
        mock.expect_find_by_id(ProductId(42)).return_ok(None);
        let service = service_over(mock.client());

        let result = service
            .update_product(ProductId(42), ProductUpdate::default())
            .await;

        assert_eq!(result.unwrap_err(), ServiceError::NotFound("42".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let mock = MockStore::<Product>::new();
        let service = service_over(mock.client());

        let mut product = widget();
        product.price = Decimal::new(1, 3);
        let err = service.create_product(product).await.unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput { ref field, .. } if field == "price"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_update_never_saves() {
        let mut stored = widget();
        stored.id = Some(ProductId(1));

        let mut mock = MockStore::<Product>::new();
        mock.expect_find_by_id(ProductId(1)).return_ok(Some(stored));
        let service = service_over(mock.client());

        // Replace mode: an absent name becomes blank
        let update = ProductUpdate {
            price: Some(Decimal::new(100, 2)),
            sku: Some("SKU-1".into()),
            ..Default::default()
        };
        let err = service
            .update_product(ProductId(1), update)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput { ref field, .. } if field == "name"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_backend_failure_is_opaque() {
        let mut mock = MockStore::<Product>::new();
        mock.expect_save()
            .return_err(StoreError::Backend("connection reset by peer".into()));
        let service = service_over(mock.client());

        let err = service.create_product(widget()).await.unwrap_err();

        match &err {
            ServiceError::Unexpected { .. } => {
                assert!(!err.to_string().contains("connection reset"));
            }
            other => panic!("Expected Unexpected, got {other:?}"),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_unique_violation_becomes_conflict() {
        let mut mock = MockStore::<Product>::new();
        mock.expect_save().return_err(StoreError::UniqueViolation {
            field: "sku".into(),
            value: "SKU-1".into(),
        });
        let service = service_over(mock.client());

        let err = service.create_product(widget()).await.unwrap_err();

        assert_eq!(err, ServiceError::conflict("sku", "SKU-1"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_sends_merged_product_with_creation_audit_intact() {
        let (store, mut receiver) = create_mock_store::<Product>(10);
        let service = service_over(store);

        let mut stored = widget();
        stored.id = Some(ProductId(3));
        stored.audit.created_by = Some("alice".into());
        let created_at = chrono::Utc::now() - chrono::Duration::hours(1);
        stored.audit.created_at = Some(created_at);
        stored.audit.updated_at = Some(created_at);

        let update = ProductUpdate {
            name: Some("Widget Pro".into()),
            description: None,
            price: Some(Decimal::new(15000, 2)),
            sku: Some("SKU-1".into()),
        };
        let task = tokio::spawn(async move { service.update_product(ProductId(3), update).await });

        let (id, responder) = expect_find_by_id(&mut receiver)
            .await
            .expect("Expected FindById request");
        assert_eq!(id, ProductId(3));
        responder.send(Ok(Some(stored))).unwrap();

        let (entity, responder) = expect_save(&mut receiver)
            .await
            .expect("Expected Save request");
        assert_eq!(entity.id, Some(ProductId(3)));
        assert_eq!(entity.name, "Widget Pro");
        assert_eq!(entity.audit.created_by.as_deref(), Some("alice"));
        assert_eq!(entity.audit.created_at, Some(created_at));
        assert_eq!(entity.audit.updated_by.as_deref(), Some("system"));
        responder.send(Ok(entity.clone())).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), entity);
    }
}
