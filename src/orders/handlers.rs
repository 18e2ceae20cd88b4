// HTTP handlers for order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::orders::{
    AssignRestaurantRequest, CreateOrderRequest, OrderError, OrderResponse, OrderStatus,
    OrderSummaryResponse, UpdateStatusRequest,
};

/// Query parameters for the manager order list
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Optional status filter
    pub status: Option<OrderStatus>,
}

/// Handler for POST /api/orders
/// Public order submission endpoint
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Validation failed, nothing was persisted")
    ),
    tag = "orders"
)]
pub async fn create_order_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), OrderError> {
    tracing::debug!("Registering order for address: {}", request.address);

    let response = state.orders.create_order(request).await?;

    tracing::info!("Registered order {}", response.id);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET /api/orders
/// Manager order list: every order with its computed total and the ranked
/// restaurants able to fulfill it
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<OrderStatus>, Query, description = "Optional status filter")
    ),
    responses(
        (status = 200, description = "Annotated order list", body = Vec<OrderSummaryResponse>)
    ),
    tag = "orders"
)]
pub async fn list_orders_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderSummaryResponse>>, OrderError> {
    tracing::debug!("Listing orders with status filter: {:?}", query.status);

    let orders = state.orders.list_orders(query.status).await?;

    tracing::debug!("Listed {} orders", orders.len());
    Ok(Json(orders))
}

/// Handler for PATCH /api/orders/{order_id}/status
/// Advances an order through the status machine
#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}/status",
    params(
        ("order_id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status transition"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn update_order_status_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, OrderError> {
    let order = state
        .orders
        .update_order_status(order_id, request.status)
        .await?;

    tracing::info!("Order {} moved to status {}", order.id, order.status);
    Ok(StatusCode::OK)
}

/// Handler for PATCH /api/orders/{order_id}/restaurant
/// Assigns the restaurant that will fulfill the order
#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}/restaurant",
    params(
        ("order_id" = String, Path, description = "Order ID")
    ),
    request_body = AssignRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant assigned"),
        (status = 404, description = "Order or restaurant not found")
    ),
    tag = "orders"
)]
pub async fn assign_restaurant_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<AssignRestaurantRequest>,
) -> Result<StatusCode, OrderError> {
    let order = state
        .orders
        .assign_restaurant(order_id, request.restaurant_id)
        .await?;

    tracing::info!(
        "Order {} assigned to restaurant {}",
        order.id,
        request.restaurant_id
    );
    Ok(StatusCode::OK)
}
