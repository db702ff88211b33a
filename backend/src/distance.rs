use crate::models::{Coordinate, DistanceKm};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn distance_between(a: Coordinate, b: Coordinate) -> DistanceKm {
    DistanceKm::new(haversine_km(a, b))
}

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    // Rounding can push `h` just past 1 near antipodal points.
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon).clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: Coordinate = Coordinate {
        lat: 28.6139,
        lon: 77.2090,
    };
    const MUMBAI: Coordinate = Coordinate {
        lat: 19.0760,
        lon: 72.8777,
    };

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinate { lat: 45.0, lon: 5.0 };
        assert_eq!(haversine_km(point, point), 0.0);
        assert_eq!(distance_between(point, point).to_string(), "0.00");
    }

    #[test]
    fn test_haversine_symmetry() {
        assert_eq!(haversine_km(DELHI, MUMBAI), haversine_km(MUMBAI, DELHI));
    }

    #[test]
    fn test_haversine_antipodal_equator() {
        let a = Coordinate { lat: 0.0, lon: 0.0 };
        let b = Coordinate { lat: 0.0, lon: 180.0 };
        assert!((haversine_km(a, b) - 20_015.09).abs() < 0.1);
    }

    #[test]
    fn test_haversine_delhi_mumbai() {
        let dist = haversine_km(DELHI, MUMBAI);
        assert!((1161.0..=1163.0).contains(&dist), "got {dist}");
    }

    #[test]
    fn test_haversine_paris_london() {
        let paris = Coordinate {
            lat: 48.8566,
            lon: 2.3522,
        };
        let london = Coordinate {
            lat: 51.5074,
            lon: -0.1278,
        };
        assert!((haversine_km(paris, london) - 343.0).abs() < 5.0);
    }

    #[test]
    fn test_distance_keeps_full_precision() {
        let distance = distance_between(DELHI, MUMBAI);
        assert_eq!(distance.km(), haversine_km(DELHI, MUMBAI));
        assert!((distance.km() - distance.rounded()).abs() <= 0.005);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_haversine_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(haversine_km(a, b) >= 0.0);
            }

            #[test]
            fn prop_haversine_symmetric(a in valid_coord(), b in valid_coord()) {
                let dist_ab = haversine_km(a, b);
                let dist_ba = haversine_km(b, a);
                prop_assert!((dist_ab - dist_ba).abs() < 1e-9);
            }

            #[test]
            fn prop_haversine_same_point_is_zero(coord in valid_coord()) {
                prop_assert_eq!(haversine_km(coord, coord), 0.0);
            }

            #[test]
            fn prop_haversine_bounded_by_half_circumference(a in valid_coord(), b in valid_coord()) {
                let max_distance = std::f64::consts::PI * EARTH_RADIUS_KM;
                prop_assert!(haversine_km(a, b) <= max_distance + 1e-6);
            }

            #[test]
            fn prop_haversine_triangle_inequality(
                a in valid_coord(),
                b in valid_coord(),
                c in valid_coord()
            ) {
                let dist_ab = haversine_km(a, b);
                let dist_bc = haversine_km(b, c);
                let dist_ac = haversine_km(a, c);
                prop_assert!(dist_ac <= dist_ab + dist_bc + 1e-6);
            }
        }
    }
}
