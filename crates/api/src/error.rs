//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fulfillment::{FulfillmentError, Rejection};
use warehouse::WarehouseError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The resource already exists.
    Conflict(String),
    /// The order was refused; nothing was created.
    InvalidOrder(Rejection),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InvalidOrder(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid order: {rejection}"),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<FulfillmentError> for ApiError {
    fn from(err: FulfillmentError) -> Self {
        match err {
            FulfillmentError::InvalidOrder(rejection) => ApiError::InvalidOrder(rejection),
            FulfillmentError::SchedulerUnavailable(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<WarehouseError> for ApiError {
    fn from(err: WarehouseError) -> Self {
        match err {
            WarehouseError::DuplicateItem(_) => ApiError::Conflict(err.to_string()),
            WarehouseError::ItemNotFound(_) | WarehouseError::SupplierNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}
