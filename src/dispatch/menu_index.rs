use std::collections::{HashMap, HashSet};

use crate::catalog::models::AvailableMenuItemRow;
use crate::geo::models::GeoPoint;

/// One restaurant with its set of products available for sale.
#[derive(Debug, Clone)]
pub struct RestaurantMenu {
    pub restaurant_id: i32,
    pub name: String,
    pub address: String,
    /// Pre-set coordinates from the restaurant record, when present.
    pub point: Option<GeoPoint>,
    pub products: HashSet<i32>,
}

/// Per-restaurant index of available product ids.
///
/// Restaurants with no available menu items do not appear in the index at
/// all, so they are never eligible for any order.
#[derive(Debug, Clone, Default)]
pub struct MenuIndex {
    menus: Vec<RestaurantMenu>,
}

impl MenuIndex {
    /// Build the index from the available-menu-item join rows.
    pub fn from_rows(rows: Vec<AvailableMenuItemRow>) -> Self {
        let mut by_restaurant: HashMap<i32, RestaurantMenu> = HashMap::new();

        for row in rows {
            let entry = by_restaurant
                .entry(row.restaurant_id)
                .or_insert_with(|| RestaurantMenu {
                    restaurant_id: row.restaurant_id,
                    name: row.restaurant_name.clone(),
                    address: row.restaurant_address.clone(),
                    point: match (row.lat, row.lon) {
                        (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
                        _ => None,
                    },
                    products: HashSet::new(),
                });
            entry.products.insert(row.product_id);
        }

        let mut menus: Vec<RestaurantMenu> = by_restaurant.into_values().collect();
        menus.sort_by(|a, b| a.name.cmp(&b.name));

        Self { menus }
    }

    /// The set of product ids available at one restaurant.
    pub fn available_products(&self, restaurant_id: i32) -> Option<&HashSet<i32>> {
        self.menus
            .iter()
            .find(|menu| menu.restaurant_id == restaurant_id)
            .map(|menu| &menu.products)
    }

    /// Restaurants whose available-product set is a superset of the order's
    /// product-id set. Quantities play no part in eligibility.
    pub fn eligible_restaurants(&self, order_products: &HashSet<i32>) -> Vec<&RestaurantMenu> {
        self.menus
            .iter()
            .filter(|menu| order_products.is_subset(&menu.products))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(restaurant_id: i32, name: &str, product_id: i32) -> AvailableMenuItemRow {
        AvailableMenuItemRow {
            restaurant_id,
            restaurant_name: name.to_string(),
            restaurant_address: format!("{} address", name),
            lat: None,
            lon: None,
            product_id,
        }
    }

    fn product_set(ids: &[i32]) -> HashSet<i32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn builds_per_restaurant_product_sets() {
        let index = MenuIndex::from_rows(vec![
            row(1, "Pepper Hut", 10),
            row(1, "Pepper Hut", 11),
            row(2, "Sushi Bar", 10),
        ]);

        assert_eq!(
            index.available_products(1),
            Some(&product_set(&[10, 11]))
        );
        assert_eq!(index.available_products(2), Some(&product_set(&[10])));
        assert_eq!(index.available_products(99), None);
    }

    #[test]
    fn restaurant_with_full_menu_is_eligible() {
        let index = MenuIndex::from_rows(vec![
            row(1, "X", 1),
            row(1, "X", 2),
            row(1, "X", 3),
            row(2, "Y", 1),
        ]);

        let order = product_set(&[1, 2]);
        let eligible = index.eligible_restaurants(&order);

        let names: Vec<&str> = eligible.iter().map(|menu| menu.name.as_str()).collect();
        assert_eq!(names, vec!["X"]);
    }

    #[test]
    fn restaurant_missing_one_product_is_not_eligible() {
        let index = MenuIndex::from_rows(vec![row(1, "Y", 1)]);

        let order = product_set(&[1, 2]);
        assert!(index.eligible_restaurants(&order).is_empty());
    }

    #[test]
    fn empty_order_is_vacuously_eligible_everywhere() {
        // An empty product set is a subset of every menu; intake validation
        // rejects empty orders, so this can only happen for data created
        // outside the API.
        let index = MenuIndex::from_rows(vec![row(1, "X", 1), row(2, "Y", 2)]);

        let eligible = index.eligible_restaurants(&HashSet::new());
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn restaurant_without_available_items_is_absent() {
        let index = MenuIndex::from_rows(vec![]);
        assert!(index.eligible_restaurants(&HashSet::new()).is_empty());
        assert_eq!(index.available_products(1), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Eligibility is exactly the superset relation: a restaurant is returned
    /// iff the order's product set is a subset of its menu.
    #[test]
    fn prop_eligibility_is_the_subset_relation() {
        proptest!(|(
            menu_ids in prop::collection::hash_set(0i32..20, 0..10),
            order_ids in prop::collection::hash_set(0i32..20, 0..10)
        )| {
            let rows: Vec<AvailableMenuItemRow> = menu_ids
                .iter()
                .map(|&product_id| AvailableMenuItemRow {
                    restaurant_id: 1,
                    restaurant_name: "R".to_string(),
                    restaurant_address: "R address".to_string(),
                    lat: None,
                    lon: None,
                    product_id,
                })
                .collect();
            let index = MenuIndex::from_rows(rows);

            let eligible = !index.eligible_restaurants(&order_ids).is_empty();
            let expected = !menu_ids.is_empty() && order_ids.is_subset(&menu_ids);
            prop_assert_eq!(eligible, expected);
        });
    }
}
