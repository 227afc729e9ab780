//! # Field Projection
//!
//! Two nested visibility tiers over the external representation of an entity:
//!
//! - [`View::Public`]: the identifier and the business-visible fields.
//! - [`View::Internal`]: everything public, plus the audit fields.
//!
//! A rendering picks exactly one tier. Fields outside the tier are *omitted* from the
//! output, never written as `null`.
//!
//! Entities opt in by implementing [`Projectable`]; the boundary wraps them in
//! [`Projected`] (or calls [`render`]) to serialize under a tier.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Public,
    Internal,
}

impl View {
    /// Whether everything visible under `other` is visible under `self`.
    pub fn includes(self, other: View) -> bool {
        matches!(
            (self, other),
            (View::Internal, _) | (View::Public, View::Public)
        )
    }

    /// Whether audit fields are part of this tier.
    pub fn shows_audit(self) -> bool {
        self.includes(View::Internal)
    }
}

/// An entity that can be serialized under a [`View`].
pub trait Projectable {
    fn project<S: Serializer>(&self, view: View, serializer: S) -> Result<S::Ok, S::Error>;
}

/// Pairs a value with the tier it should be serialized under.
pub struct Projected<'a, T: ?Sized> {
    value: &'a T,
    view: View,
}

impl<'a, T: Projectable + ?Sized> Projected<'a, T> {
    pub fn new(value: &'a T, view: View) -> Self {
        Self { value, view }
    }
}

impl<T: Projectable + ?Sized> Serialize for Projected<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.project(self.view, serializer)
    }
}

pub fn render<T: Projectable>(value: &T, view: View) -> serde_json::Result<Value> {
    serde_json::to_value(Projected::new(value, view))
}

pub fn render_all<T: Projectable>(values: &[T], view: View) -> serde_json::Result<Value> {
    let projected: Vec<_> = values.iter().map(|v| Projected::new(v, view)).collect();
    serde_json::to_value(projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_is_a_strict_superset_of_public() {
        assert!(View::Internal.includes(View::Public));
        assert!(View::Internal.includes(View::Internal));
        assert!(View::Public.includes(View::Public));
        assert!(!View::Public.includes(View::Internal));
        assert!(!View::Public.shows_audit());
        assert!(View::Internal.shows_audit());
    }
}
