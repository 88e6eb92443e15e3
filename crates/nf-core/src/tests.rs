//! Unit tests for nf-core primitives.

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, PlanarPoint};

    fn reference_haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
        let r = 6_371_000.0_f64;
        let (p1, p2) = (lat1.to_radians(), lat2.to_radians());
        let dp = p2 - p1;
        let dl = (lon2 - lon1).to_radians();
        let a = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
        2.0 * r * a.sqrt().atan2((1.0 - a).sqrt())
    }

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(127.0, 37.5);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.195 km on a 6 371 km sphere
        let a = GeoPoint::new(-88.0, 30.0);
        let b = GeoPoint::new(-88.0, 31.0);
        let d = a.distance_m(b);
        assert!((d - 111_194.93).abs() < 0.01, "got {d}");
    }

    #[test]
    fn matches_reference_within_relative_tolerance() {
        let cases = [
            (127.000, 37.500, 127.010, 37.500),
            (126.978, 37.566, 127.027, 37.498),
            (129.075, 35.179, 126.705, 37.456),
        ];
        for (lon1, lat1, lon2, lat2) in cases {
            let got = GeoPoint::new(lon1, lat1).distance_m(GeoPoint::new(lon2, lat2));
            let want = reference_haversine(lon1, lat1, lon2, lat2);
            assert!(((got - want) / want).abs() < 1e-6, "{got} vs {want}");
        }
    }

    #[test]
    fn east_west_segment_near_seoul() {
        let d = GeoPoint::new(127.000, 37.500).distance_m(GeoPoint::new(127.010, 37.500));
        assert!((d - 882.169).abs() < 0.001, "got {d}");
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(127.0, 37.5).is_valid());
        assert!(!GeoPoint::new(127.0, 91.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 37.5).is_valid());
    }

    #[test]
    fn planar_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }
}

#[cfg(test)]
mod projection {
    use crate::{
        CoordinateProjector, CoreError, Ellipsoid, GeoPoint, InverseProjector, PlanarPoint,
        TransverseMercator,
    };

    #[test]
    fn origin_maps_to_false_origin() {
        let tm = TransverseMercator::korea_2000_unified();
        let p = tm.project(GeoPoint::new(127.5, 38.0));
        assert!((p.x - 1_000_000.0).abs() < 1e-6, "x = {}", p.x);
        assert!((p.y - 2_000_000.0).abs() < 1e-6, "y = {}", p.y);
    }

    #[test]
    fn seoul_city_hall() {
        let tm = TransverseMercator::korea_2000_unified();
        let p = tm.project(GeoPoint::new(126.978, 37.5665));
        assert!((p.x - 953_901.165).abs() < 0.01, "x = {}", p.x);
        assert!((p.y - 1_952_032.081).abs() < 0.01, "y = {}", p.y);
    }

    #[test]
    fn symmetric_about_central_meridian() {
        let tm = TransverseMercator::korea_2000_unified();
        let west = tm.project(GeoPoint::new(126.5, 36.0));
        let east = tm.project(GeoPoint::new(128.5, 36.0));
        assert!(((west.x - 1_000_000.0) + (east.x - 1_000_000.0)).abs() < 1e-6);
        assert!((west.y - east.y).abs() < 1e-6);
    }

    #[test]
    fn projected_distance_close_to_great_circle() {
        let tm = TransverseMercator::korea_2000_unified();
        let a = GeoPoint::new(127.000, 37.500);
        let b = GeoPoint::new(127.010, 37.500);
        let planar = tm.project(a).distance(tm.project(b));
        let sphere = a.distance_m(b);
        // scale error near the central meridian plus sphere/ellipsoid gap
        assert!(((planar - sphere) / sphere).abs() < 5e-3, "{planar} vs {sphere}");
    }

    #[test]
    fn inverse_of_false_origin() {
        let tm = TransverseMercator::korea_2000_unified();
        let g = tm.unproject(PlanarPoint::new(1_000_000.0, 2_000_000.0));
        assert!((g.lon - 127.5).abs() < 1e-12);
        assert!((g.lat - 38.0).abs() < 1e-12);
    }

    #[test]
    fn utm_zone_52_wgs84() {
        let utm = TransverseMercator::new(Ellipsoid::WGS84, 129.0, 0.0, 0.9996, 500_000.0, 0.0)
            .unwrap();
        assert_eq!(utm.central_meridian(), 129.0);
        let p = utm.project(GeoPoint::new(129.0, 0.0));
        assert!((p.x - 500_000.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad_k0 = TransverseMercator::new(Ellipsoid::GRS80, 127.5, 38.0, 0.0, 0.0, 0.0);
        assert!(matches!(bad_k0, Err(CoreError::InvalidProjection(_))));

        let bad_origin = TransverseMercator::new(Ellipsoid::GRS80, 127.5, 90.0, 1.0, 0.0, 0.0);
        assert!(matches!(bad_origin, Err(CoreError::InvalidProjection(_))));

        let bad_axis = Ellipsoid { a: -1.0, f: 0.0 };
        assert!(TransverseMercator::new(bad_axis, 0.0, 0.0, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn usable_through_reference() {
        fn project_all<P: CoordinateProjector>(p: P, pts: &[GeoPoint]) -> Vec<PlanarPoint> {
            pts.iter().map(|&g| p.project(g)).collect()
        }
        let tm = TransverseMercator::korea_2000_unified();
        let out = project_all(&tm, &[GeoPoint::new(127.5, 38.0)]);
        assert_eq!(out.len(), 1);
    }
}

#[cfg(test)]
mod projection_props {
    use proptest::prelude::*;

    use crate::{CoordinateProjector, GeoPoint, InverseProjector, TransverseMercator};

    proptest! {
        /// Anywhere over the Korean peninsula and its waters, projecting and
        /// unprojecting returns the input to within ~0.1 mm.
        #[test]
        fn round_trip_inside_region(lon in 124.0f64..132.0, lat in 33.0f64..39.0) {
            let tm = TransverseMercator::korea_2000_unified();
            let back = tm.unproject(tm.project(GeoPoint::new(lon, lat)));
            prop_assert!((back.lon - lon).abs() < 1e-9, "lon {} -> {}", lon, back.lon);
            prop_assert!((back.lat - lat).abs() < 1e-9, "lat {} -> {}", lat, back.lat);
        }

        #[test]
        fn northing_increases_with_latitude(lon in 125.0f64..130.0, lat in 33.0f64..38.9) {
            let tm = TransverseMercator::korea_2000_unified();
            let lo = tm.project(GeoPoint::new(lon, lat));
            let hi = tm.project(GeoPoint::new(lon, lat + 0.1));
            prop_assert!(hi.y > lo.y);
        }
    }
}

#[cfg(test)]
mod transport {
    use crate::{CoreError, TransportMode};

    #[test]
    fn display() {
        assert_eq!(TransportMode::Car.to_string(), "car");
        assert_eq!(TransportMode::Walk.to_string(), "walk");
    }

    #[test]
    fn parse() {
        assert_eq!("Car".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert_eq!(" walk ".parse::<TransportMode>().unwrap(), TransportMode::Walk);
        assert!(matches!("tram".parse::<TransportMode>(), Err(CoreError::UnknownMode(_))));
    }
}
