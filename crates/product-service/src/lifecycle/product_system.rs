use crate::boundary::ProductController;
use crate::model::Product;
use crate::services::ProductService;
use resource_framework::{
    ActorProvider, AuditStamper, LifecycleService, ServiceConfig, StoreActor, SystemActor,
    SystemClock, View,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

/// The runtime orchestrator for the product catalog.
///
/// `ProductSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the product store actor
/// - **Dependency Wiring**: handing the store, clock and acting-identity provider to the service
///
/// # Example
///
/// ```ignore
/// let system = ProductSystem::new(ServiceConfig::default());
///
/// let created = system.product_service.create_product(product).await?;
/// let body = system.controller(View::Public).find_by_id(1).await;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct ProductSystem {
    /// Service for the product resource
    pub product_service: ProductService,

    config: ServiceConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ProductSystem {
    /// Creates the system with no authenticated caller: every write is stamped with
    /// `config.system_actor`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_actor_provider(config, Arc::new(SystemActor))
    }

    /// Creates the system with a custom source for the acting identity.
    pub fn with_actor_provider(config: ServiceConfig, actors: Arc<dyn ActorProvider>) -> Self {
        // 1. Create the store actor
        let (store_actor, store_client) = StoreActor::<Product>::new(config.store_buffer);

        // 2. Start it
        let store_handle = tokio::spawn(store_actor.run());

        // 3. Wire the service
        let stamper = AuditStamper::new(
            Arc::new(SystemClock),
            actors,
            config.system_actor.clone(),
        );
        let lifecycle = LifecycleService::new(Arc::new(store_client), stamper, config.merge_mode);

        info!(
            merge_mode = %config.merge_mode,
            system_actor = %config.system_actor,
            "Product system started"
        );

        Self {
            product_service: ProductService::new(lifecycle),
            config,
            handles: vec![store_handle],
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// A controller rendering bodies under `view`.
    pub fn controller(&self, view: View) -> ProductController {
        ProductController::new(self.product_service.clone(), view)
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the service closes the store channel and the actor exits its loop.
    /// Every clone of the service (and every controller) must be dropped first,
    /// otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.product_service);

        for handle in self.handles {
            // If the task panicked, this will return an Err
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
