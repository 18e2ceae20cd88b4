use sqlx::PgPool;

use crate::catalog::models::{AvailableMenuItemRow, AvailableProductRow, Product, Restaurant};

/// Repository for catalog reads: restaurants, products and menu items
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new CatalogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all restaurants ordered by name.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, address, contact_phone, lat, lon
            FROM restaurants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(restaurants)
    }

    /// Check whether a restaurant exists.
    pub async fn restaurant_exists(&self, restaurant_id: i32) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(restaurant_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Products available for sale in at least one restaurant, with category.
    pub async fn list_available_products(&self) -> Result<Vec<AvailableProductRow>, sqlx::Error> {
        let products = sqlx::query_as::<_, AvailableProductRow>(
            r#"
            SELECT DISTINCT p.id, p.name, p.price, p.description,
                   c.id AS category_id, c.name AS category_name
            FROM products p
            LEFT JOIN product_categories c ON c.id = p.category_id
            JOIN restaurant_menu_items mi ON mi.product_id = p.id AND mi.availability = TRUE
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Find multiple products by IDs
    pub async fn find_products_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price, description
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// All available menu items joined with their restaurant, the raw
    /// material of the menu availability index.
    pub async fn list_available_menu_items(
        &self,
    ) -> Result<Vec<AvailableMenuItemRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AvailableMenuItemRow>(
            r#"
            SELECT r.id AS restaurant_id, r.name AS restaurant_name,
                   r.address AS restaurant_address, r.lat, r.lon,
                   mi.product_id
            FROM restaurant_menu_items mi
            JOIN restaurants r ON r.id = mi.restaurant_id
            WHERE mi.availability = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
