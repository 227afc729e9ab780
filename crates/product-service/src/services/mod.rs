//! # Services
//!
//! Resource-specific services built on the generic
//! [`LifecycleService`](resource_framework::LifecycleService).

pub mod product_service;

pub use product_service::ProductService;
