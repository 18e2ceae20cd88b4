use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Domain model representing a restaurant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    /// Pre-set coordinates; when absent the address is geocoded on demand.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Domain model representing a product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub price: Decimal,
    pub description: String,
}

/// One product of one restaurant's menu, with the restaurant data the
/// ranking engine needs. Produced by joining `restaurant_menu_items`
/// (availability = true) with `restaurants`.
#[derive(Debug, Clone, FromRow)]
pub struct AvailableMenuItemRow {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub product_id: i32,
}

/// Product category reference in API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

/// Response DTO for a product currently available for sale
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub description: String,
    pub category: Option<CategoryResponse>,
}

/// Row shape behind `ProductResponse`, joined with the category table.
#[derive(Debug, Clone, FromRow)]
pub struct AvailableProductRow {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
}

impl From<AvailableProductRow> for ProductResponse {
    fn from(row: AvailableProductRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategoryResponse { id, name }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            category,
        }
    }
}
