use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Order not found")]
    NotFound,

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(i32),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation failed")]
    Validation(validator::ValidationErrors),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for OrderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        OrderError::Validation(errors)
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        // Field-level validation detail keeps its structure; everything else
        // is a plain message. Database detail is logged, not exposed.
        let (status, error_body) = match self {
            OrderError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("A database error occurred"),
                )
            }
            OrderError::NotFound => (StatusCode::NOT_FOUND, json!("Order not found")),
            OrderError::ProductNotFound(id) => (
                StatusCode::BAD_REQUEST,
                json!({ "products": format!("Product with id {} does not exist", id) }),
            ),
            OrderError::RestaurantNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!(format!("Restaurant with id {} not found", id)),
            ),
            OrderError::InvalidQuantity(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "products": msg }))
            }
            OrderError::InvalidPhone(phone) => (
                StatusCode::BAD_REQUEST,
                json!({ "phonenumber": format!("Invalid phone number: {}", phone) }),
            ),
            OrderError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            OrderError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::to_value(&errors).unwrap_or(json!("Request validation failed")),
            ),
        };

        let body = Json(json!({
            "error": error_body,
        }));

        (status, body).into_response()
    }
}
