//! Uniform error body returned by the API.

use chrono::{DateTime, Utc};
use resource_framework::ServiceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ApiErrorResponse {
    pub fn from_service_error(err: &ServiceError, path: impl Into<String>) -> Self {
        Self::at(err, path, Utc::now())
    }

    /// Same as [`from_service_error`](Self::from_service_error) with an explicit timestamp.
    pub fn at(err: &ServiceError, path: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let (status, error) = classify(err);
        Self {
            timestamp,
            status,
            error: error.to_string(),
            // Unexpected renders as its correlation id only.
            message: err.to_string(),
            path: path.into(),
        }
    }
}

/// HTTP status code and title for each service failure.
pub fn classify(err: &ServiceError) -> (u16, &'static str) {
    match err {
        ServiceError::NotFound(_) => (404, "Resource Not Found"),
        ServiceError::InvalidInput { .. } => (400, "Validation Error"),
        ServiceError::Conflict { .. } => (409, "Conflict"),
        ServiceError::Unexpected { .. } => (500, "Internal Server Error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::NotFound("1".into()), 404, "Resource Not Found"),
            (ServiceError::invalid("name", "must not be blank"), 400, "Validation Error"),
            (ServiceError::conflict("sku", "SKU-1"), 409, "Conflict"),
            (
                ServiceError::Unexpected {
                    correlation_id: Uuid::nil(),
                },
                500,
                "Internal Server Error",
            ),
        ];
        for (err, status, title) in cases {
            let body = ApiErrorResponse::from_service_error(&err, "/api/v1/products/1");
            assert_eq!(body.status, status);
            assert_eq!(body.error, title);
            assert_eq!(body.path, "/api/v1/products/1");
        }
    }

    #[test]
    fn test_unexpected_message_carries_only_correlation_id() {
        let correlation_id = Uuid::new_v4();
        let body = ApiErrorResponse::from_service_error(
            &ServiceError::Unexpected { correlation_id },
            "/api/v1/products",
        );
        assert!(body.message.contains(&correlation_id.to_string()));
    }

    #[test]
    fn test_serialized_shape() {
        let body = ApiErrorResponse::from_service_error(
            &ServiceError::conflict("sku", "SKU-1"),
            "/api/v1/products",
        );
        let json = serde_json::to_value(&body).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["error", "message", "path", "status", "timestamp"]);
    }
}
