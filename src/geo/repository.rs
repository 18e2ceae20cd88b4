use sqlx::PgPool;

use crate::geo::models::{Coordinate, GeoPoint};

/// Repository for cached address coordinates
#[derive(Clone)]
pub struct CoordinateRepository {
    pool: PgPool,
}

impl CoordinateRepository {
    /// Create a new CoordinateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the cached row for one exact address string.
    pub async fn find_by_address(&self, address: &str) -> Result<Option<Coordinate>, sqlx::Error> {
        let row = sqlx::query_as::<_, Coordinate>(
            "SELECT id, address, lat, lon, recorded_at FROM coordinates WHERE address = $1",
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find cached rows for a batch of addresses in one query.
    pub async fn find_by_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Coordinate>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Coordinate>(
            "SELECT id, address, lat, lon, recorded_at FROM coordinates WHERE address = ANY($1)",
        )
        .bind(addresses)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Record the outcome of a geocode attempt for an address.
    ///
    /// A failed attempt is stored as a NULL-coordinate row. Concurrent first
    /// writers for the same address race benignly: the uniqueness constraint
    /// on `address` rejects the duplicate insert and the first writer wins.
    pub async fn insert(
        &self,
        address: &str,
        point: Option<GeoPoint>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO coordinates (address, lat, lon)
            VALUES ($1, $2, $3)
            ON CONFLICT (address) DO NOTHING
            "#,
        )
        .bind(address)
        .bind(point.map(|p| p.lat))
        .bind(point.map(|p| p.lon))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
