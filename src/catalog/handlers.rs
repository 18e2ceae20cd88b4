// HTTP handlers for catalog endpoints

use axum::{extract::State, Json};

use crate::catalog::models::{ProductResponse, Restaurant};
use crate::error::ApiError;

/// Handler for GET /api/products
/// Lists products currently available for sale in at least one restaurant
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List of available products", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn list_products_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    tracing::debug!("Fetching available products");

    let products = state.catalog.list_available_products().await?;

    tracing::debug!("Retrieved {} available products", products.len());
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Handler for GET /api/restaurants
/// Lists all restaurants
#[utoipa::path(
    get,
    path = "/api/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = Vec<Restaurant>),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn list_restaurants_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    tracing::debug!("Fetching restaurants");

    let restaurants = state.catalog.list_restaurants().await?;

    Ok(Json(restaurants))
}
