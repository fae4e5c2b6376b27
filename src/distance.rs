//! Great-circle distance on a spherical Earth

use haversine::{Location as HaversineLocation, Units, distance};

use crate::models::Coordinate;

/// Mean Earth radius in kilometers, as used by `haversine::Units::Kilometers`
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers
#[must_use]
pub fn calculate_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    distance(to_haversine(from), to_haversine(to), Units::Kilometers)
}

fn to_haversine(coordinate: &Coordinate) -> HaversineLocation {
    HaversineLocation {
        latitude: coordinate.latitude(),
        longitude: coordinate.longitude(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::f64::consts::PI;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn sample_points() -> Vec<Coordinate> {
        vec![
            coord(0.0, 0.0),
            coord(42.0413, 12.3308),
            coord(-33.8688, 151.2093),
            coord(90.0, 0.0),
            coord(-90.0, 45.0),
            coord(51.5074, -0.1278),
            coord(0.0, 180.0),
            coord(0.0, -180.0),
            coord(64.1466, -21.9426),
        ]
    }

    #[test]
    fn test_same_point_is_zero() {
        for point in sample_points() {
            assert_eq!(calculate_distance(&point, &point), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                let ab = calculate_distance(a, b);
                let ba = calculate_distance(b, a);
                assert!((ab - ba).abs() < 1e-9, "{a:?} {b:?}: {ab} != {ba}");
            }
        }
    }

    #[test]
    fn test_distance_is_bounded() {
        let max = PI * EARTH_RADIUS_KM;
        let points = sample_points();
        for a in &points {
            for b in &points {
                let d = calculate_distance(a, b);
                assert!(d >= 0.0);
                assert!(d <= max + 1e-6, "{d} exceeds half circumference");
            }
        }
    }

    #[test]
    fn test_quarter_great_circle() {
        let d = calculate_distance(&coord(0.0, 0.0), &coord(0.0, 90.0));
        assert_eq!(format!("{d:.2}"), "10007.54");
    }

    #[rstest]
    #[case(coord(0.0, 0.0), coord(0.0, 180.0))]
    #[case(coord(45.0, 10.0), coord(-45.0, -170.0))]
    #[case(coord(90.0, 0.0), coord(-90.0, 0.0))]
    #[case(coord(42.0413, 12.3308), coord(-42.0413, -167.6692))]
    fn test_antipodal_points_are_half_circumference(#[case] a: Coordinate, #[case] b: Coordinate) {
        let d = calculate_distance(&a, &b);
        assert!(d.is_finite());
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-2, "{d}");
    }

    #[rstest]
    #[case(coord(0.0, 0.0), coord(0.0, 90.0))]
    #[case(coord(0.0, 0.0), coord(90.0, 0.0))]
    #[case(coord(0.0, 45.0), coord(0.0, -45.0))]
    fn test_quarter_circles_agree(#[case] a: Coordinate, #[case] b: Coordinate) {
        let d = calculate_distance(&a, &b);
        assert!((d - PI / 2.0 * EARTH_RADIUS_KM).abs() < 1e-6, "{d}");
    }
}
