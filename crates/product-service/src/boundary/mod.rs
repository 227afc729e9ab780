//! # API Boundary
//!
//! Everything between a transport and the [`ProductService`](crate::services::ProductService):
//! the request DTO, the error body, and the controller that ties them together.
//!
//! Caller input never reaches the service unfiltered. [`ProductDto`] drops the
//! identifier and every audit field before a `Product` or `ProductUpdate` is built.

pub mod controller;
pub mod dto;
pub mod error_response;

pub use controller::{ApiResponse, ApiResult, ProductController, BASE_PATH};
pub use dto::ProductDto;
pub use error_response::ApiErrorResponse;
