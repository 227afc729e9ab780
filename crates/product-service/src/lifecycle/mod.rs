//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the product catalog: starting the
//! store actor, wiring the service, and shutting everything down again.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Instantiate the store actor and its client
//! 2. **Dependency Injection** - Hand the client, the clock and the acting-identity
//!    provider to the [`ProductService`](crate::services::ProductService)
//! 3. **Configuration** - Apply a [`ServiceConfig`](resource_framework::ServiceConfig)
//!    (system identity, merge mode, channel capacity)
//! 4. **Graceful Shutdown** - Close the channel and await the actor
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the service** - closes the sender side of the store channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for the actor task to finish
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole process.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Lifecycle outcomes
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod product_system;

pub use product_system::*;
pub use resource_framework::tracing::setup_tracing;
