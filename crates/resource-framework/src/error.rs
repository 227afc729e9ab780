//! # Framework Errors
//!
//! Two layers of errors live here:
//!
//! - [`StoreError`] is what a [`ResourceStore`](crate::store::ResourceStore) reports.
//! - [`ServiceError`] is what the [`LifecycleService`](crate::service::LifecycleService)
//!   returns to the boundary. It is the only error type callers ever see.
//!
//! The service translates the first into the second and nothing else rewrites it on
//! the way out, so a `NotFound` raised deep inside an update reaches the boundary as
//! the same `NotFound`.

use uuid::Uuid;

/// Typed failures of the lifecycle operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No current entity has this identifier. The id is carried in its `Display`
    /// form so the error stays independent of the entity's id type.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A business invariant failed. The caller can fix the value and retry.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// A uniqueness constraint would be violated by this value.
    #[error("Value '{value}' for '{field}' is already in use")]
    Conflict { field: String, value: String },

    /// Anything the store failed with that is not classified above.
    /// Only the correlation id leaves the service; the cause is logged.
    #[error("Unexpected failure (correlation id {correlation_id})")]
    Unexpected { correlation_id: Uuid },
}

impl ServiceError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ServiceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        ServiceError::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors surfaced by a store implementation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    /// A row with the same unique key already exists.
    #[error("Unique constraint violated on '{field}' = '{value}'")]
    UniqueViolation { field: String, value: String },
    /// An update targeted an identifier that is no longer stored.
    #[error("Row missing: {0}")]
    Missing(String),
    #[error("Store backend error: {0}")]
    Backend(String),
}
