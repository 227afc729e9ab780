//! Wire format accepted from and returned to API callers.

use crate::model::{Product, ProductUpdate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// camelCase JSON body for product requests.
///
/// Every field is optional on the wire so that a malformed body still reaches
/// validation and fails with a field-level `InvalidInput` instead of a parse error.
/// `id` and the audit fields are accepted for symmetry with the output and then
/// dropped by [`into_product`](Self::into_product) and
/// [`into_update`](Self::into_update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDto {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl ProductDto {
    /// Builds a new, unpersisted product. Missing values become empty and are
    /// rejected by validation.
    pub fn into_product(self) -> Product {
        let mut product = Product::new(
            self.name.unwrap_or_default(),
            self.price.unwrap_or_default(),
            self.sku.unwrap_or_default(),
        );
        product.description = self.description;
        product
    }

    pub fn into_update(self) -> ProductUpdate {
        ProductUpdate {
            name: self.name,
            description: self.description,
            price: self.price,
            sku: self.sku,
        }
    }
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.map(|id| id.0),
            name: Some(product.name.clone()),
            description: product.description.clone(),
            price: Some(product.price),
            sku: Some(product.sku.clone()),
            created_at: product.audit.created_at,
            created_by: product.audit.created_by.clone(),
            updated_at: product.audit.updated_at,
            updated_by: product.audit.updated_by.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    const TAMPERED: &str = r#"{
        "id": 99,
        "name": "Widget",
        "price": 10.5,
        "sku": "SKU-1",
        "createdAt": "2001-01-01T00:00:00Z",
        "createdBy": "mallory",
        "updatedBy": "mallory"
    }"#;

    #[test]
    fn test_into_product_discards_identity_and_audit() {
        let dto: ProductDto = serde_json::from_str(TAMPERED).unwrap();
        assert_eq!(dto.id, Some(99));
        assert_eq!(dto.created_by.as_deref(), Some("mallory"));

        let product = dto.into_product();
        assert_eq!(product.id, None);
        assert_eq!(product.audit, Default::default());
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, Decimal::new(105, 1));
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_into_update_keeps_only_business_fields() {
        let dto: ProductDto = serde_json::from_str(TAMPERED).unwrap();
        let update = dto.into_update();
        assert_eq!(
            update,
            ProductUpdate {
                name: Some("Widget".into()),
                description: None,
                price: Some(Decimal::new(105, 1)),
                sku: Some("SKU-1".into()),
            }
        );
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let dto: ProductDto = serde_json::from_str("{}").unwrap();
        let product = dto.into_product();
        assert!(product.name.is_empty());
        assert!(product.price.is_zero());
    }

    #[test]
    fn test_price_is_parsed_exactly() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"price": 10.0000000000000001}"#).unwrap();
        assert_eq!(dto.price, Some(Decimal::new(100_000_000_000_000_001, 16)));

        let dto: ProductDto = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert_eq!(dto.price, None);
    }

    #[test]
    fn test_from_product_round_trips_business_fields() {
        let mut product = Product::new("Widget", Decimal::new(1999, 2), "SKU-9");
        product.id = Some(ProductId(4));
        let dto = ProductDto::from(&product);
        assert_eq!(dto.id, Some(4));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["price"], 19.99);
        assert_eq!(json["sku"], "SKU-9");
    }
}
