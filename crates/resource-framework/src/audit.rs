//! # Audit Metadata Lifecycle
//!
//! Every stored entity embeds an [`AuditMetadata`] value. The
//! [`LifecycleService`](crate::service::LifecycleService) stamps it at exactly two points:
//!
//! 1. **First persist** ([`AuditMetadata::stamp_created`]): `created_at` and `updated_at`
//!    become the current instant and `created_by` the acting identity.
//! 2. **Every persist that changes stored state** ([`AuditMetadata::stamp_updated`]):
//!    `updated_at` and `updated_by` are refreshed. Creation fields stay untouched.
//!
//! The acting identity comes from an injected [`ActorProvider`]. When the provider has
//! nobody to report, the configured system identity is used instead.
//!
//! Audit fields are never taken from caller input: update payloads cannot carry them,
//! and `create` overwrites whatever the entity arrived with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Creation and update actor/timestamp pairs.
///
/// All fields are `None` until the entity is persisted for the first time.
/// Serializes with the camelCase keys used by the internal projection tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl AuditMetadata {
    /// Stamps the first persist. `updated_by` stays empty until an actual update.
    pub fn stamp_created(&mut self, now: DateTime<Utc>, actor: &str) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self.created_by = Some(actor.to_string());
        self.updated_by = None;
    }

    /// Stamps a state-changing persist.
    ///
    /// `updated_at` never moves backwards and never precedes `created_at`, even if
    /// the clock does.
    pub fn stamp_updated(&mut self, now: DateTime<Utc>, actor: &str) {
        let floor = self.updated_at.max(self.created_at);
        self.updated_at = Some(floor.map_or(now, |floor| floor.max(now)));
        self.updated_by = Some(actor.to_string());
    }
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Supplies the identity of whoever is acting on the current request.
pub trait ActorProvider: Send + Sync {
    /// `None` when there is no authenticated caller context.
    fn current_actor(&self) -> Option<String>;
}

/// Provider for deployments without authentication: always defers to the system identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemActor;

impl ActorProvider for SystemActor {
    fn current_actor(&self) -> Option<String> {
        None
    }
}

/// Provider that always reports the same caller.
#[derive(Debug, Clone)]
pub struct FixedActor(pub String);

impl ActorProvider for FixedActor {
    fn current_actor(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Bundles the clock, the actor provider and the fallback system identity.
#[derive(Clone)]
pub struct AuditStamper {
    clock: Arc<dyn Clock>,
    actors: Arc<dyn ActorProvider>,
    system_actor: String,
}

impl AuditStamper {
    pub fn new(
        clock: Arc<dyn Clock>,
        actors: Arc<dyn ActorProvider>,
        system_actor: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            actors,
            system_actor: system_actor.into(),
        }
    }

    /// System clock, no authenticated callers.
    pub fn system(system_actor: impl Into<String>) -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(SystemActor), system_actor)
    }

    pub fn acting_identity(&self) -> String {
        self.actors
            .current_actor()
            .filter(|actor| !actor.trim().is_empty())
            .unwrap_or_else(|| self.system_actor.clone())
    }

    pub fn on_create(&self, audit: &mut AuditMetadata) {
        audit.stamp_created(self.clock.now(), &self.acting_identity());
    }

    pub fn on_update(&self, audit: &mut AuditMetadata) {
        audit.stamp_updated(self.clock.now(), &self.acting_identity());
    }
}
