//! # Store Contract
//!
//! The minimal persistence operations the lifecycle service needs from durable
//! storage. The crate ships one implementation, the in-memory
//! [`StoreActor`](crate::actor::StoreActor) reached through a
//! [`StoreClient`](crate::client::StoreClient); a SQL-backed store only has to
//! implement this trait.
//!
//! Implementations own consistency: a single `save` is atomic, and unique keys are
//! enforced *inside* `save`, reported as [`StoreError::UniqueViolation`]. The service
//! never pre-checks uniqueness.

use crate::entity::Resource;
use crate::error::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait ResourceStore<T: Resource>: Send + Sync {
    /// All stored entities, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// Inserts when `entity` has no identifier (assigning one), otherwise replaces the
    /// stored row with that identifier. Returns the stored entity.
    ///
    /// # Errors
    /// - [`StoreError::UniqueViolation`] if another row already holds one of the
    ///   entity's unique keys. Nothing is written.
    /// - [`StoreError::Missing`] if the identifier is not stored.
    async fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Removes the row permanently. Returns whether a row was removed.
    async fn delete_by_id(&self, id: T::Id) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
