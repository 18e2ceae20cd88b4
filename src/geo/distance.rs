use crate::geo::models::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance between two points in kilometers.
///
/// Deterministic for given inputs and symmetric in its arguments, which the
/// ranking engine relies on for reproducible ordering.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lon = (delta_lon / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

/// Round a distance to two decimal places for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        let p = GeoPoint {
            lat: 55.7558,
            lon: 37.6173,
        };
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn moscow_to_saint_petersburg_is_around_634_km() {
        let moscow = GeoPoint {
            lat: 55.7558,
            lon: 37.6173,
        };
        let saint_petersburg = GeoPoint {
            lat: 59.9343,
            lon: 30.3351,
        };
        let distance = haversine_km(moscow, saint_petersburg);
        assert!((distance - 634.0).abs() < 5.0);
    }

    #[test]
    fn round_km_keeps_two_decimals() {
        assert_eq!(round_km(12.3456), 12.35);
        assert_eq!(round_km(0.004), 0.0);
        assert_eq!(round_km(1.006), 1.01);
    }
}
