//! # Domain Model
//!
//! Pure data structures managed by the resource framework.

pub mod product;

pub use product::*;
