//! Great-circle distance on a spherical Earth.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
///
/// Symmetric and zero for identical points. Non-finite coordinates yield NaN.
///
/// # Examples
///
/// ```
/// use u_wasteroute::distance::haversine;
/// use u_wasteroute::models::GeoPoint;
///
/// let a = GeoPoint::new(37.7749, -122.4194);
/// let b = GeoPoint::new(37.7849, -122.4094);
/// let d = haversine(a, b);
/// assert!((d - haversine(b, a)).abs() < 1e-12);
/// assert!(d > 1.0 && d < 1.5);
/// ```
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlon = (b.lon() - a.lon()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // h can drift past 1.0 for antipodal points; NaN passes through
    let h = if h > 1.0 { 1.0 } else { h };
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points() {
        let p = GeoPoint::new(37.765, -122.42);
        assert_eq!(haversine(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        // 2πR / 360
        assert!((d - 111.19492664455873).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal() {
        let d = haversine(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        let d = haversine(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(1.0, 1.0));
        assert!(d.is_nan());
    }

    fn coord() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in coord(), b in coord()) {
            prop_assert!((haversine(a, b) - haversine(b, a)).abs() < 1e-9);
        }

        #[test]
        fn prop_zero_on_self(a in coord()) {
            prop_assert_eq!(haversine(a, a), 0.0);
        }

        #[test]
        fn prop_nonnegative(a in coord(), b in coord()) {
            prop_assert!(haversine(a, b) >= 0.0);
        }

        #[test]
        fn prop_triangle_inequality(a in coord(), b in coord(), c in coord()) {
            let direct = haversine(a, c);
            let via = haversine(a, b) + haversine(b, c);
            prop_assert!(direct <= via + 1e-6);
        }
    }
}
