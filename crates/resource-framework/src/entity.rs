//! # Resource Traits
//!
//! The [`Resource`] trait defines the contract that every entity (Product, and whatever
//! comes after it) must implement to be managed by the generic
//! [`LifecycleService`](crate::service::LifecycleService) and stored by a
//! [`ResourceStore`](crate::store::ResourceStore).
//!
//! # Architecture Note
//! There is no entity base class. An entity *composes* an identifier and an
//! [`AuditMetadata`] value, and advertises them through two small capability traits:
//!
//! - [`Identified`]: "I have an identifier, assigned by the store on first persist."
//! - [`Audited`]: "I carry audit metadata."
//!
//! [`Resource`] builds on both and adds the entity-specific parts of the lifecycle:
//! how an update is merged, which invariants must hold, and which fields are unique.
//! The service logic is written *once* against these traits and reused everywhere.
//!
//! We use an associated `Update` type to enforce type safety. A `Product` is updated
//! with a `ProductUpdate`, and that payload has no slot for the identifier or the
//! creation audit fields, so they cannot be overwritten by accident.

use crate::audit::AuditMetadata;
use crate::error::ServiceError;
use crate::merge::MergeMode;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Something with a store-assigned identifier.
pub trait Identified {
    /// The unique identifier for this entity.
    /// Must be constructible from the store's `u64` sequence for automatic ID generation.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug + From<u64> + 'static;

    /// `None` until the entity has been persisted.
    fn id(&self) -> Option<&Self::Id>;

    /// Called by the store on first persist. Nothing else assigns identifiers.
    fn assign_id(&mut self, id: Self::Id);
}

/// Something carrying [`AuditMetadata`].
pub trait Audited {
    fn audit(&self) -> &AuditMetadata;
    fn audit_mut(&mut self) -> &mut AuditMetadata;
}

/// A `(field, value)` pair that must be unique across all stored entities of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueKey {
    pub field: &'static str,
    pub value: String,
}

impl UniqueKey {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Trait that any entity must implement to be managed by the lifecycle service.
///
/// `PartialEq` lets the service tell whether a merge actually changed anything,
/// so that an unchanged update does not refresh the update audit fields.
pub trait Resource: Identified + Audited + Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Caller-supplied values for the business fields. Every field is optional;
    /// what an absent field means is decided by the [`MergeMode`].
    type Update: Send + Sync + Debug;

    /// Human readable resource name used in logs and error messages (e.g. `"Product"`).
    fn resource_name() -> &'static str;

    /// Projects `update` onto `self`.
    ///
    /// Implementations touch business fields only. The identifier and audit metadata
    /// are owned by the store and the service respectively.
    fn apply_update(&mut self, update: Self::Update, mode: MergeMode);

    /// Checks the business invariants, failing with [`ServiceError::InvalidInput`].
    ///
    /// Uniqueness is *not* checked here; the store enforces it at write time.
    fn validate(&self) -> Result<(), ServiceError>;

    /// Values the store must keep unique across all entities of this type.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }
}
