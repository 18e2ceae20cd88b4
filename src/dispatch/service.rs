use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::catalog::repository::CatalogRepository;
use crate::dispatch::menu_index::MenuIndex;
use crate::dispatch::ranking::{rank_by_distance, RankedRestaurant};
use crate::geo::cache::CoordinateCache;
use crate::geo::models::GeoPoint;

/// The slice of an order the assignment engine needs.
#[derive(Debug, Clone)]
pub struct DispatchOrder {
    pub order_id: Uuid,
    pub address: String,
    pub product_ids: HashSet<i32>,
}

/// Restaurant assignment and distance-ranking engine.
///
/// Read-only apart from lazy coordinate-cache population; recomputed on
/// every manager order view, never cached.
#[derive(Clone)]
pub struct DispatchService {
    catalog: CatalogRepository,
    coordinates: CoordinateCache,
}

impl DispatchService {
    /// Create a new DispatchService
    pub fn new(catalog: CatalogRepository, coordinates: CoordinateCache) -> Self {
        Self {
            catalog,
            coordinates,
        }
    }

    /// For each order, the restaurants able to fulfill it ranked by distance
    /// to the delivery address.
    ///
    /// An order whose delivery address cannot be resolved gets an empty list
    /// rather than an error, and a restaurant without resolvable coordinates
    /// is omitted from the rankings it would otherwise appear in: the view
    /// must still render, degraded.
    pub async fn annotate_orders(
        &self,
        orders: &[DispatchOrder],
    ) -> Result<HashMap<Uuid, Vec<RankedRestaurant>>, sqlx::Error> {
        let rows = self.catalog.list_available_menu_items().await?;
        let index = MenuIndex::from_rows(rows);

        let eligible_by_order: Vec<_> = orders
            .iter()
            .map(|order| (order, index.eligible_restaurants(&order.product_ids)))
            .collect();

        // One batched cache pass over every address the view needs: order
        // delivery addresses plus eligible restaurants without pre-set
        // coordinates.
        let mut addresses: Vec<String> =
            orders.iter().map(|order| order.address.clone()).collect();
        for (_, eligible) in &eligible_by_order {
            addresses.extend(
                eligible
                    .iter()
                    .filter(|menu| menu.point.is_none() && !menu.address.is_empty())
                    .map(|menu| menu.address.clone()),
            );
        }
        let points = self.coordinates.resolve_many(&addresses).await?;

        let mut rankings = HashMap::new();
        for (order, eligible) in eligible_by_order {
            let Some(order_point) = points.get(&order.address).copied() else {
                rankings.insert(order.order_id, Vec::new());
                continue;
            };

            let candidates: Vec<(String, GeoPoint)> = eligible
                .into_iter()
                .filter_map(|menu| {
                    let point = menu.point.or_else(|| points.get(&menu.address).copied())?;
                    Some((menu.name.clone(), point))
                })
                .collect();

            rankings.insert(order.order_id, rank_by_distance(order_point, candidates));
        }

        Ok(rankings)
    }
}
