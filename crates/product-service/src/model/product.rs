//! Represents a product in the catalog.
//!
//! # Resource Framework
//! This struct implements the [`Resource`](resource_framework::Resource) trait,
//! allowing it to be managed by a [`LifecycleService`](resource_framework::LifecycleService)
//! and stored by a [`StoreActor`](resource_framework::StoreActor).
//!
//! See [`impl Resource for Product`](#impl-Resource-for-Product) for details on:
//! - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
//! - Validation rules
//! - The unique `sku` key

use resource_framework::{
    Audited, AuditMetadata, Identified, MergeMode, Projectable, Resource, ServiceError,
    UniqueKey, View,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use std::fmt::Display;

pub const NAME_MAX_CHARS: usize = 255;
pub const SKU_MAX_CHARS: usize = 100;
pub const PRICE_SCALE: u32 = 2;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub audit: AuditMetadata,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sku: String,
}

impl Product {
    /// Creates a new, not yet persisted Product.
    ///
    /// # Arguments
    /// * `name` - Product name
    /// * `price` - Unit price, at most two fractional digits
    /// * `sku` - Stock keeping unit, unique across the catalog
    pub fn new(name: impl Into<String>, price: Decimal, sku: impl Into<String>) -> Self {
        Self {
            id: None,
            audit: AuditMetadata::default(),
            name: name.into(),
            description: None,
            price,
            sku: sku.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// Update parameters. Which absent fields survive depends on the MergeMode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
}

impl Identified for Product {
    type Id = ProductId;

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }
}

impl Audited for Product {
    fn audit(&self) -> &AuditMetadata {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditMetadata {
        &mut self.audit
    }
}

impl Resource for Product {
    type Update = ProductUpdate;

    fn resource_name() -> &'static str {
        "Product"
    }

    fn apply_update(&mut self, update: ProductUpdate, mode: MergeMode) {
        self.name = mode.resolve(std::mem::take(&mut self.name), update.name);
        self.description = mode.resolve(self.description.take(), update.description.map(Some));
        self.price = mode.resolve(self.price, update.price);
        self.sku = mode.resolve(std::mem::take(&mut self.sku), update.sku);
    }

    fn validate(&self) -> Result<(), ServiceError> {
        require_text("name", &self.name, NAME_MAX_CHARS)?;
        require_text("sku", &self.sku, SKU_MAX_CHARS)?;

        if self.price <= Decimal::ZERO {
            return Err(ServiceError::invalid("price", "must be greater than zero"));
        }
        // 10.50 is fine, 10.505 is not
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(ServiceError::invalid(
                "price",
                format!("must have at most {PRICE_SCALE} fractional digits"),
            ));
        }
        Ok(())
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("sku", self.sku.clone())]
    }
}

fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid(field, "must not be blank"));
    }
    if value.chars().count() > max_chars {
        return Err(ServiceError::invalid(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(())
}

/// External shape of a product under a projection tier.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRepr<'a> {
    id: Option<ProductId>,
    name: &'a str,
    description: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
    sku: &'a str,
    #[serde(flatten)]
    audit: Option<&'a AuditMetadata>,
}

impl Projectable for Product {
    fn project<S: Serializer>(&self, view: View, serializer: S) -> Result<S::Ok, S::Error> {
        ProductRepr {
            id: self.id,
            name: &self.name,
            description: self.description.as_deref(),
            price: self.price,
            sku: &self.sku,
            audit: view.shows_audit().then_some(&self.audit),
        }
        .serialize(serializer)
    }
}
