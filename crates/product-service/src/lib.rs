//! # Product Service Library
//!
//! This library exposes the core modules of the application for integration testing.

pub mod boundary;
pub mod lifecycle;
pub mod model;
pub mod services;
