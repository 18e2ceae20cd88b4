use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::orders::error::OrderError;
use crate::orders::models::{Order, OrderItem, OrderStatus, OrderWithTotal, PaymentMethod};

/// Field bundle for inserting a new order row.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub firstname: String,
    pub lastname: String,
    /// Normalized E.164 phone number
    pub phone: String,
    pub address: String,
    pub comment: String,
    pub payment: PaymentMethod,
}

const ORDER_COLUMNS: &str = "id, firstname, lastname, phone, address, status, payment, comment, \
                             registered_at, called_at, delivered_at, restaurant_id";

/// Repository for order operations
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    /// Create a new OrdersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new order with its line items in a single transaction.
    ///
    /// Either the order row and every item row commit together, or nothing
    /// does. `items` carries (product_id, quantity, price_snapshot).
    pub async fn create(
        &self,
        new_order: NewOrder,
        items: Vec<(i32, i32, Decimal)>,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (firstname, lastname, phone, address, comment, payment)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&new_order.firstname)
        .bind(&new_order.lastname)
        .bind(&new_order.phone)
        .bind(&new_order.address)
        .bind(&new_order.comment)
        .bind(new_order.payment)
        .fetch_one(&mut *tx)
        .await?;

        for (product_id, quantity, price) in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(product_id)
            .bind(quantity)
            .bind(price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// All orders with their computed total price and assigned restaurant
    /// name, newest first, optionally filtered by status.
    ///
    /// The total is Σ item price × quantity over the snapshotted line-item
    /// prices, computed in SQL.
    pub async fn list_with_totals(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderWithTotal>, OrderError> {
        let base_query = r#"
            SELECT o.id, o.firstname, o.lastname, o.phone, o.address, o.status,
                   o.payment, o.comment, o.registered_at, o.restaurant_id,
                   r.name AS restaurant_name,
                   COALESCE(SUM(oi.price * oi.quantity), 0) AS total_price
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            LEFT JOIN restaurants r ON r.id = o.restaurant_id
        "#;

        let orders = match status {
            Some(status_filter) => {
                sqlx::query_as::<_, OrderWithTotal>(&format!(
                    r#"
                    {base_query}
                    WHERE o.status = $1
                    GROUP BY o.id, r.name
                    ORDER BY o.registered_at DESC
                    "#
                ))
                .bind(status_filter)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderWithTotal>(&format!(
                    r#"
                    {base_query}
                    GROUP BY o.id, r.name
                    ORDER BY o.registered_at DESC
                    "#
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Update order status
    pub async fn update_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $1
            WHERE id = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(new_status)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        Ok(order)
    }

    /// Assign the fulfilling restaurant
    pub async fn assign_restaurant(
        &self,
        order_id: Uuid,
        restaurant_id: i32,
    ) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET restaurant_id = $1
            WHERE id = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(restaurant_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        Ok(order)
    }
}

/// Repository for order line-item operations
#[derive(Clone)]
pub struct OrderItemsRepository {
    pool: PgPool,
}

impl OrderItemsRepository {
    /// Create a new OrderItemsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all items for a given order
    pub async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<OrderItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find all items for a batch of orders in one query, the access pattern
    /// of the manager order list.
    pub async fn find_by_order_ids(
        &self,
        order_ids: &[Uuid],
    ) -> Result<Vec<OrderItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
