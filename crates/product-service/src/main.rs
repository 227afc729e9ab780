//! # Product Service
//!
//! A catalog of products managed by the generic resource framework.
//!
//! ## Core Components
//!
//! - **[resource_framework]**: the generic [`LifecycleService`](resource_framework::LifecycleService), the in-memory store actor and the projection tiers.
//! - **[model]**: the [`Product`](product_service::model::Product) entity and its validation rules.
//! - **[services]**: [`ProductService`](product_service::services::ProductService), the product-specific entry points.
//! - **[boundary]**: DTOs, error bodies and the controller.
//! - **[lifecycle]**: orchestration of the store actor and the service.
//!
//! ## Quick Start
//!
//! The walkthrough below:
//! 1.  Loads configuration from `PRODUCTS_*` environment variables.
//! 2.  Creates, reads, updates and deletes a product.
//! 3.  Prints both projection tiers along the way.

use product_service::boundary::ProductDto;
use product_service::lifecycle::{setup_tracing, ProductSystem};
use product_service::model::{Product, ProductUpdate};
use resource_framework::{render, FixedActor, ResourceService, ServiceConfig, View};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServiceConfig::from_env("PRODUCTS")?;
    info!(?config, "Starting product service");

    let system = ProductSystem::with_actor_provider(config, Arc::new(FixedActor("demo".into())));
    let products = system.product_service.clone();
    info!(merge_mode = %system.config().merge_mode, "Updates resolve absent fields by merge mode");

    let span = tracing::info_span!("product_creation");
    let created = async {
        info!("Creating product");
        products
            .create_product(
                Product::new("Widget", Decimal::new(12345, 2), "SKU-1")
                    .with_description("A very useful widget"),
            )
            .await
    }
    .instrument(span)
    .await?;

    let id = created.id.ok_or("store did not assign an id")?;
    info!(%id, "Product created successfully");
    println!("public:   {}", render(&created, View::Public)?);
    println!("internal: {}", render(&created, View::Internal)?);

    // A second product with the same SKU is rejected by the store
    if let Err(e) = products
        .create_product(Product::new("Widget copy", Decimal::new(100, 2), "SKU-1"))
        .await
    {
        warn!(error = %e, "Duplicate SKU rejected");
    }

    let span = tracing::info_span!("product_update");
    let update = ProductUpdate {
        name: Some("Widget Pro".into()),
        description: Some("Now with more widget".into()),
        price: Some(Decimal::new(14999, 2)),
        sku: Some("SKU-1".into()),
    };
    let updated = products.update_product(id, update).instrument(span).await?;
    println!("updated:  {}", render(&updated, View::Internal)?);

    // Same round trip through the boundary
    let api = system.controller(View::Public);
    let dto = ProductDto {
        name: Some("Gadget".into()),
        price: Some(Decimal::new(999, 2)),
        sku: Some("SKU-2".into()),
        created_by: Some("ignored".into()),
        ..Default::default()
    };
    match api.create(dto).await {
        Ok(response) => info!(status = response.status, location = ?response.location, "Created via controller"),
        Err(body) => warn!(status = body.status, message = %body.message, "Controller rejected request"),
    }
    drop(api);

    info!(count = products.count().await?, "Catalog size");

    products.delete_by_id(id).await?;
    if let Err(e) = products.find_by_id(id).await {
        info!(error = %e, "Deleted product is gone");
    }

    drop(products);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
