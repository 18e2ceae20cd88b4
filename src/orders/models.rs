use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dispatch::ranking::RankedRestaurant;

/// Order status enum representing the lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Cooking,
    InTransit,
    Completed,
}

impl OrderStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Cooking => "cooking",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::New
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method chosen by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Electronic,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Electronic
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Electronic => "electronic",
        };
        write!(f, "{}", label)
    }
}

/// Domain model representing an order in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub comment: String,
    pub registered_at: DateTime<Utc>,
    pub called_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub restaurant_id: Option<i32>,
}

/// Domain model representing a line item within an order
///
/// `price` is the unit price snapshotted at order-creation time; later
/// product price changes do not touch it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: Uuid,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

/// One order joined with its computed total and assigned restaurant name,
/// the row shape behind the manager order list.
#[derive(Debug, Clone, FromRow)]
pub struct OrderWithTotal {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub comment: String,
    pub registered_at: DateTime<Utc>,
    pub restaurant_id: Option<i32>,
    pub restaurant_name: Option<String>,
    pub total_price: Decimal,
}

/// Request DTO for one submitted line item
///
/// Quantity positivity is enforced by the order service, which owns the
/// line-item business rules.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    /// Product id, as exposed by GET /api/products
    pub product: i32,
    pub quantity: i32,
}

/// Request DTO for the public order submission API
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 25, message = "First name must be 1-25 characters"))]
    pub firstname: String,
    #[validate(length(min = 1, max = 25, message = "Last name must be 1-25 characters"))]
    pub lastname: String,
    #[validate(custom = "crate::validation::validate_phone")]
    pub phonenumber: String,
    #[validate(length(min = 1, max = 100, message = "Address must be 1-100 characters"))]
    pub address: String,
    #[validate(length(min = 1, message = "Order must contain at least one product"))]
    pub products: Vec<OrderItemRequest>,
    #[validate(length(max = 200, message = "Comment must be at most 200 characters"))]
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentMethod>,
}

/// Request DTO for advancing order status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Request DTO for assigning the fulfilling restaurant
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRestaurantRequest {
    pub restaurant_id: i32,
}

/// Response DTO for one line item
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product: i32,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Response DTO for a created order
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    /// Normalized E.164 phone number
    pub phonenumber: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub comment: String,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub items: Vec<OrderItemResponse>,
    pub registered_at: DateTime<Utc>,
}

/// Response DTO for one order in the manager order list, annotated with the
/// ranked restaurants able to fulfill it.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment: PaymentMethod,
    pub comment: String,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    /// Name of the assigned restaurant, if a manager picked one
    pub restaurant: Option<String>,
    /// Restaurants able to fulfill the order, closest first
    pub available_restaurants: Vec<RankedRestaurant>,
    pub registered_at: DateTime<Utc>,
}
