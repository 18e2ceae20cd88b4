use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A resolved geographic position.
///
/// This is the single canonical coordinate representation in the codebase:
/// named `lat`/`lon` fields, never a bare tuple. The geocoding provider
/// reports positions longitude-first; that ordering is converted exactly once,
/// in the response parser (`client::parse_pos`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Cached geocoding result for one exact address string.
///
/// A row with NULL `lat`/`lon` records an address the provider could not
/// resolve; keeping it prevents repeated external calls for the same bad
/// address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coordinate {
    pub id: i32,
    pub address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl Coordinate {
    /// The stored position, if the geocode attempt succeeded.
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_with_both_fields_yields_point() {
        let row = Coordinate {
            id: 1,
            address: "Moscow, Tverskaya 1".to_string(),
            lat: Some(55.757),
            lon: Some(37.615),
            recorded_at: Utc::now(),
        };
        assert_eq!(
            row.point(),
            Some(GeoPoint {
                lat: 55.757,
                lon: 37.615
            })
        );
    }

    #[test]
    fn coordinate_with_missing_field_yields_none() {
        let row = Coordinate {
            id: 2,
            address: "Unknown St 1".to_string(),
            lat: None,
            lon: None,
            recorded_at: Utc::now(),
        };
        assert_eq!(row.point(), None);

        let half = Coordinate {
            lat: Some(55.0),
            ..row
        };
        assert_eq!(half.point(), None);
    }
}
