//! # Generic Lifecycle Service
//!
//! [`LifecycleService<T>`] orchestrates read/create/update/delete for any
//! [`Resource`] on top of a [`ResourceStore`]. It is written once and bound to a
//! concrete entity by handing it a store for that entity.
//!
//! ## Operations
//!
//! * **find_all / count**: straight reads.
//! * **find_by_id**: `NotFound(id)` when absent.
//! * **create**:
//!     1. Rejects an entity that already carries an identifier.
//!     2. Validates the business invariants.
//!     3. Stamps creation audit metadata.
//!     4. Saves; the store assigns the identifier.
//! * **update**:
//!     1. Loads the current entity (`NotFound` propagates unchanged).
//!     2. Merges the update according to the configured [`MergeMode`].
//!     3. Validates the merged result.
//!     4. If the merge changed nothing, returns the loaded entity without writing.
//!     5. Otherwise stamps update audit metadata and saves.
//! * **delete_by_id**: permanent removal; `NotFound` when nothing was removed.
//!
//! ## Store failures
//!
//! | Store error | Service error |
//! |-------------|---------------|
//! | `UniqueViolation { field, value }` | `Conflict { field, value }` |
//! | `Missing(id)` | `NotFound(id)` |
//! | anything else | `Unexpected { correlation_id }`, cause logged at `error` |
//!
//! The service keeps no cache and takes no locks. Concurrent updates to the same
//! identifier are last-write-wins; concurrent creates with the same unique key are
//! decided by the store.

use crate::audit::AuditStamper;
use crate::entity::Resource;
use crate::error::{ServiceError, StoreError};
use crate::merge::MergeMode;
use crate::store::ResourceStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub struct LifecycleService<T: Resource> {
    store: Arc<dyn ResourceStore<T>>,
    stamper: AuditStamper,
    merge_mode: MergeMode,
}

impl<T: Resource> Clone for LifecycleService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            stamper: self.stamper.clone(),
            merge_mode: self.merge_mode,
        }
    }
}

impl<T: Resource> LifecycleService<T> {
    pub fn new(
        store: Arc<dyn ResourceStore<T>>,
        stamper: AuditStamper,
        merge_mode: MergeMode,
    ) -> Self {
        Self {
            store,
            stamper,
            merge_mode,
        }
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.merge_mode
    }

    pub async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        let resource = T::resource_name();
        debug!(resource, "FindAll");
        let items = self.store.find_all().await.map_err(translate)?;
        info!(resource, size = items.len(), "Listed");
        Ok(items)
    }

    pub async fn find_by_id(&self, id: T::Id) -> Result<T, ServiceError> {
        let resource = T::resource_name();
        debug!(resource, %id, "FindById");
        match self.store.find_by_id(id.clone()).await.map_err(translate)? {
            Some(item) => {
                debug!(resource, %id, "Found");
                Ok(item)
            }
            None => {
                warn!(resource, %id, "Not found");
                Err(ServiceError::NotFound(id.to_string()))
            }
        }
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.store.count().await.map_err(translate)
    }

    pub async fn create(&self, mut entity: T) -> Result<T, ServiceError> {
        let resource = T::resource_name();
        debug!(resource, ?entity, "Create");

        if let Some(id) = entity.id() {
            warn!(resource, %id, "Create with caller-assigned id rejected");
            return Err(ServiceError::invalid(
                "id",
                "must not be supplied when creating a resource",
            ));
        }
        entity.validate().inspect_err(|e| {
            warn!(resource, error = %e, "Create failed validation");
        })?;

        self.stamper.on_create(entity.audit_mut());
        let saved = self
            .store
            .save(entity)
            .await
            .map_err(translate)
            .inspect_err(|e| log_write_failure(resource, None::<&T::Id>, e))?;

        if let Some(id) = saved.id() {
            info!(resource, %id, "Created");
        }
        Ok(saved)
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, ServiceError> {
        let resource = T::resource_name();
        debug!(resource, %id, ?update, "Update");

        let current = self.find_by_id(id.clone()).await?;
        let mut merged = current.clone();
        merged.apply_update(update, self.merge_mode);
        merged.validate().inspect_err(|e| {
            warn!(resource, %id, error = %e, "Update failed validation");
        })?;

        if merged == current {
            debug!(resource, %id, "Update changed nothing");
            return Ok(current);
        }

        self.stamper.on_update(merged.audit_mut());
        let saved = self
            .store
            .save(merged)
            .await
            .map_err(translate)
            .inspect_err(|e| log_write_failure(resource, Some(&id), e))?;

        info!(resource, %id, "Updated");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: T::Id) -> Result<(), ServiceError> {
        let resource = T::resource_name();
        debug!(resource, %id, "Delete");

        if self.store.delete_by_id(id.clone()).await.map_err(translate)? {
            info!(resource, %id, "Deleted");
            Ok(())
        } else {
            warn!(resource, %id, "Not found");
            Err(ServiceError::NotFound(id.to_string()))
        }
    }
}

/// Maps a store failure onto the service taxonomy.
///
/// Unclassified failures get a fresh correlation id; the cause is logged here and
/// never returned.
fn translate(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation { field, value } => ServiceError::Conflict { field, value },
        StoreError::Missing(id) => ServiceError::NotFound(id),
        other => {
            let correlation_id = Uuid::new_v4();
            error!(%correlation_id, error = %other, "Unexpected store failure");
            ServiceError::Unexpected { correlation_id }
        }
    }
}

fn log_write_failure<I: std::fmt::Display>(resource: &str, id: Option<&I>, err: &ServiceError) {
    let id = id.map(ToString::to_string);
    match err {
        ServiceError::Unexpected { .. } => {}
        other => warn!(resource, id = ?id, error = %other, "Write rejected"),
    }
}

/// Trait for resource-specific services to inherit the shared lifecycle operations.
///
/// A service only has to expose its inner [`LifecycleService`]; reads and deletes
/// come for free, and it adds whatever entity-specific entry points it needs.
///
/// # Example
///
/// ```rust,ignore
/// struct TagService { inner: LifecycleService<Tag> }
///
/// impl ResourceService<Tag> for TagService {
///     fn lifecycle(&self) -> &LifecycleService<Tag> {
///         &self.inner
///     }
/// }
///
/// // find_all(), find_by_id(), delete_by_id() and count() are provided.
/// let tags = service.find_all().await?;
/// ```
#[async_trait]
pub trait ResourceService<T: Resource>: Send + Sync {
    /// Access the inner generic service.
    fn lifecycle(&self) -> &LifecycleService<T>;

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        self.lifecycle().find_all().await
    }

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn find_by_id(&self, id: T::Id) -> Result<T, ServiceError> {
        self.lifecycle().find_by_id(id).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::resource_name()))]
    async fn delete_by_id(&self, id: T::Id) -> Result<(), ServiceError> {
        self.lifecycle().delete_by_id(id).await
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        self.lifecycle().count().await
    }
}
