//! # Resource Framework
//!
//! This crate provides the building blocks for managing the lifecycle of REST-style
//! resources: create, read, update and delete, with audit metadata, partial-update
//! merging, uniqueness enforcement and tiered projection of the external representation.
//!
//! The lifecycle rules are written **once**, generically, and bound to a concrete entity
//! by implementing a handful of traits for it.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`Resource`], [`Identified`], [`Audited`]) - your domain model,
//!    its merge rules and its invariants
//! 2. **Service Layer** ([`LifecycleService`], [`ResourceService`]) - the generic
//!    lifecycle, audit stamping and error translation
//! 3. **Store Layer** ([`ResourceStore`]) - the persistence contract, implemented
//!    in-memory by [`StoreActor`] behind a [`StoreClient`]
//! 4. **Boundary Layer** ([`View`], [`Projectable`], [`render`]) - what a caller is
//!    allowed to see
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::{
//!     Audited, AuditMetadata, AuditStamper, Identified, LifecycleService, MergeMode,
//!     Resource, ServiceError, StoreActor,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Label {
//!     id: Option<u64>,
//!     audit: AuditMetadata,
//!     text: String,
//! }
//!
//! #[derive(Debug)]
//! struct LabelUpdate {
//!     text: Option<String>,
//! }
//!
//! impl Identified for Label {
//!     type Id = u64;
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn assign_id(&mut self, id: u64) { self.id = Some(id); }
//! }
//!
//! impl Audited for Label {
//!     fn audit(&self) -> &AuditMetadata { &self.audit }
//!     fn audit_mut(&mut self) -> &mut AuditMetadata { &mut self.audit }
//! }
//!
//! impl Resource for Label {
//!     type Update = LabelUpdate;
//!     fn resource_name() -> &'static str { "Label" }
//!     fn apply_update(&mut self, update: LabelUpdate, mode: MergeMode) {
//!         self.text = mode.resolve(std::mem::take(&mut self.text), update.text);
//!     }
//!     fn validate(&self) -> Result<(), ServiceError> {
//!         if self.text.trim().is_empty() {
//!             return Err(ServiceError::invalid("text", "must not be blank"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::<Label>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let service = LifecycleService::new(
//!         Arc::new(store),
//!         AuditStamper::system("system"),
//!         MergeMode::Replace,
//!     );
//!
//!     let label = Label { id: None, audit: AuditMetadata::default(), text: "urgent".into() };
//!     let created = service.create(label).await.unwrap();
//!     assert_eq!(created.id, Some(1));
//!     assert_eq!(created.audit.created_by.as_deref(), Some("system"));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The in-memory store runs in its own Tokio task and processes requests
//!   **sequentially**, so uniqueness is decided at write time without locks
//! - Services are cheap to clone and hold no state besides their collaborators
//! - Concurrent updates to one identifier are last-write-wins
//!
//! ## Testing
//!
//! The [`mock`] module provides a **MockStore** that answers store requests from a
//! queue of expectations, for unit tests that need a store failure or need to prove
//! that no write happened.

pub mod actor;
pub mod audit;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod merge;
pub mod message;
pub mod mock;
pub mod projection;
pub mod service;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use audit::{
    ActorProvider, AuditMetadata, AuditStamper, Clock, FixedActor, SystemActor, SystemClock,
};
pub use client::StoreClient;
pub use config::{ConfigError, ServiceConfig};
pub use entity::{Audited, Identified, Resource, UniqueKey};
pub use error::{ServiceError, StoreError};
pub use merge::MergeMode;
pub use message::{Response, StoreRequest};
pub use projection::{render, render_all, Projectable, Projected, View};
pub use service::{LifecycleService, ResourceService};
pub use store::ResourceStore;
