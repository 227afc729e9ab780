//! # Product Controller
//!
//! Transport-agnostic handlers for the `/api/v1/products` resource. Each handler
//! takes already-parsed input, calls the [`ProductService`] and answers with either
//! an [`ApiResponse`] (status, optional `Location`, optional JSON body) or an
//! [`ApiErrorResponse`]. Bodies are rendered under the controller's [`View`].
//!
//! | Handler | Success |
//! |---------|---------|
//! | `find_all` | 200, list |
//! | `find_by_id` | 200, product |
//! | `create` | 201, product, `Location: /api/v1/products/{id}` |
//! | `update` | 200, product |
//! | `delete` | 204, no body |

use crate::boundary::{ApiErrorResponse, ProductDto};
use crate::model::ProductId;
use crate::services::ProductService;
use resource_framework::{render, render_all, ResourceService, ServiceError, View};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

pub const BASE_PATH: &str = "/api/v1/products";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub location: Option<String>,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            location: None,
            body: Some(body),
        }
    }
}

pub type ApiResult = Result<ApiResponse, ApiErrorResponse>;

#[derive(Clone)]
pub struct ProductController {
    service: ProductService,
    view: View,
}

impl ProductController {
    pub fn new(service: ProductService, view: View) -> Self {
        Self { service, view }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub async fn find_all(&self) -> ApiResult {
        info!("Find all products request received");
        let products = self
            .service
            .find_all()
            .await
            .map_err(|e| failure(&e, BASE_PATH.to_string()))?;
        let body = render_all(&products, self.view).map_err(|e| encode_failure(e, BASE_PATH))?;
        Ok(ApiResponse::ok(body))
    }

    pub async fn find_by_id(&self, id: u64) -> ApiResult {
        let path = item_path(id);
        info!(id, "Find product request received");
        let product = self
            .service
            .find_by_id(ProductId(id))
            .await
            .map_err(|e| failure(&e, path.clone()))?;
        let body = render(&product, self.view).map_err(|e| encode_failure(e, &path))?;
        Ok(ApiResponse::ok(body))
    }

    pub async fn create(&self, dto: ProductDto) -> ApiResult {
        info!(name = ?dto.name, "Create product request received");
        let created = self
            .service
            .create_product(dto.into_product())
            .await
            .map_err(|e| failure(&e, BASE_PATH.to_string()))?;
        let body = render(&created, self.view).map_err(|e| encode_failure(e, BASE_PATH))?;
        let location = created.id.map(|id| item_path(id.0));
        info!(location = ?location, "Product created");
        Ok(ApiResponse {
            status: 201,
            location,
            body: Some(body),
        })
    }

    pub async fn update(&self, id: u64, dto: ProductDto) -> ApiResult {
        let path = item_path(id);
        info!(id, "Update product request received");
        let updated = self
            .service
            .update_product(ProductId(id), dto.into_update())
            .await
            .map_err(|e| failure(&e, path.clone()))?;
        let body = render(&updated, self.view).map_err(|e| encode_failure(e, &path))?;
        Ok(ApiResponse::ok(body))
    }

    pub async fn delete(&self, id: u64) -> ApiResult {
        info!(id, "Delete product request received");
        self.service
            .delete_by_id(ProductId(id))
            .await
            .map_err(|e| failure(&e, item_path(id)))?;
        Ok(ApiResponse {
            status: 204,
            location: None,
            body: None,
        })
    }
}

fn item_path(id: u64) -> String {
    format!("{BASE_PATH}/{id}")
}

fn failure(err: &ServiceError, path: String) -> ApiErrorResponse {
    ApiErrorResponse::from_service_error(err, path)
}

fn encode_failure(err: serde_json::Error, path: &str) -> ApiErrorResponse {
    let correlation_id = Uuid::new_v4();
    error!(%correlation_id, error = %err, "Failed to render response body");
    ApiErrorResponse::from_service_error(&ServiceError::Unexpected { correlation_id }, path)
}
