use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::distance::{haversine_km, round_km};
use crate::geo::models::GeoPoint;

/// One restaurant able to fulfill an order, with its distance to the
/// delivery address.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedRestaurant {
    pub name: String,
    pub distance_km: f64,
}

/// Rank candidate restaurants by distance to the delivery address.
///
/// Sorted ascending by distance; ties broken by restaurant name ascending so
/// the output is deterministic for a given set of coordinates.
pub fn rank_by_distance(
    order_point: GeoPoint,
    candidates: Vec<(String, GeoPoint)>,
) -> Vec<RankedRestaurant> {
    let mut ranked: Vec<RankedRestaurant> = candidates
        .into_iter()
        .map(|(name, point)| RankedRestaurant {
            name,
            distance_km: round_km(haversine_km(order_point, point)),
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.name.cmp(&b.name))
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_POINT: GeoPoint = GeoPoint {
        lat: 55.7558,
        lon: 37.6173,
    };

    #[test]
    fn sorts_by_distance_ascending() {
        let ranked = rank_by_distance(
            ORDER_POINT,
            vec![
                (
                    "Far".to_string(),
                    GeoPoint {
                        lat: 55.9,
                        lon: 37.9,
                    },
                ),
                (
                    "Near".to_string(),
                    GeoPoint {
                        lat: 55.76,
                        lon: 37.62,
                    },
                ),
            ],
        );

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Far"]);
        assert!(ranked[0].distance_km <= ranked[1].distance_km);
    }

    #[test]
    fn ties_break_by_name_ascending() {
        let point = GeoPoint {
            lat: 55.76,
            lon: 37.62,
        };
        let ranked = rank_by_distance(
            ORDER_POINT,
            vec![
                ("Zebra Grill".to_string(), point),
                ("Apple Cafe".to_string(), point),
            ],
        );

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Cafe", "Zebra Grill"]);
        assert_eq!(ranked[0].distance_km, ranked[1].distance_km);
    }

    #[test]
    fn distances_are_rounded_to_two_decimals() {
        let ranked = rank_by_distance(
            ORDER_POINT,
            vec![(
                "R".to_string(),
                GeoPoint {
                    lat: 55.82,
                    lon: 37.64,
                },
            )],
        );

        let km = ranked[0].distance_km;
        assert_eq!(km, round_km(km));
    }

    #[test]
    fn no_candidates_yields_empty_ranking() {
        assert!(rank_by_distance(ORDER_POINT, Vec::new()).is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate_strategy() -> impl Strategy<Value = (String, GeoPoint)> {
        ("[a-z]{1,8}", -85.0f64..=85.0, -180.0f64..=180.0)
            .prop_map(|(name, lat, lon)| (name, GeoPoint { lat, lon }))
    }

    /// The ranking is a total order: every adjacent pair is ordered by
    /// (distance, name).
    #[test]
    fn prop_ranking_is_totally_ordered() {
        proptest!(|(
            candidates in prop::collection::vec(candidate_strategy(), 0..12),
            lat in -85.0f64..=85.0,
            lon in -180.0f64..=180.0
        )| {
            let ranked = rank_by_distance(GeoPoint { lat, lon }, candidates);
            for pair in ranked.windows(2) {
                let ordered = pair[0].distance_km < pair[1].distance_km
                    || (pair[0].distance_km == pair[1].distance_km
                        && pair[0].name <= pair[1].name);
                prop_assert!(ordered);
            }
        });
    }

    /// Ranking preserves every candidate: nothing is dropped or duplicated.
    #[test]
    fn prop_ranking_preserves_candidates() {
        proptest!(|(
            candidates in prop::collection::vec(candidate_strategy(), 0..12)
        )| {
            let mut expected: Vec<String> =
                candidates.iter().map(|(name, _)| name.clone()).collect();
            let ranked = rank_by_distance(
                GeoPoint { lat: 55.0, lon: 37.0 },
                candidates,
            );
            let mut actual: Vec<String> = ranked.into_iter().map(|r| r.name).collect();
            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        });
    }
}
