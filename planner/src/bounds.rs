use shared::{BoundingBox, GeoPoint};

/// Region the map is locked to. `east` is numerically smaller than `west`;
/// the values are the deployment's literal edges and the containment test
/// below compares against them as written.
pub const REGION: BoundingBox = BoundingBox::from_edges(13.2827, 12.6933, 77.0849, 78.1602);

/// Initial map centre inside [`REGION`].
pub const REGION_CENTER: GeoPoint = GeoPoint::from_const(12.97, 77.56);

/// `south <= lat <= north` and `east <= lon <= west`, inclusive on every edge.
pub fn is_in_bounds(point: GeoPoint, bbox: &BoundingBox) -> bool {
    let lat_ok = bbox.south() <= point.lat() && point.lat() <= bbox.north();
    let lon_ok = bbox.east() <= point.lon() && point.lon() <= bbox.west();
    lat_ok && lon_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_city_centre_is_inside() {
        assert!(is_in_bounds(point(12.97, 77.59), &REGION));
        assert!(is_in_bounds(REGION_CENTER, &REGION));
    }

    #[test]
    fn test_edges_are_inclusive() {
        assert!(is_in_bounds(point(REGION.north(), REGION.east()), &REGION));
        assert!(is_in_bounds(point(REGION.south(), REGION.west()), &REGION));
    }

    #[test]
    fn test_outside_each_edge() {
        assert!(!is_in_bounds(point(13.3, 77.5), &REGION));
        assert!(!is_in_bounds(point(12.6, 77.5), &REGION));
        assert!(!is_in_bounds(point(12.97, 77.0), &REGION));
        assert!(!is_in_bounds(point(12.97, 78.2), &REGION));
    }

    #[test]
    fn test_conventional_box_rejects_everything_when_east_exceeds_west() {
        // With east > west the longitude interval is empty.
        let bbox = BoundingBox::new(10.0, 0.0, 20.0, 10.0).unwrap();
        assert!(!is_in_bounds(point(5.0, 15.0), &bbox));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_point() -> impl Strategy<Value = GeoPoint> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lon)| point(lat, lon))
        }

        proptest! {
            #[test]
            fn prop_matches_literal_comparison(p in valid_point()) {
                let expected = REGION.south() <= p.lat()
                    && p.lat() <= REGION.north()
                    && REGION.east() <= p.lon()
                    && p.lon() <= REGION.west();
                prop_assert_eq!(is_in_bounds(p, &REGION), expected);
            }

            #[test]
            fn prop_points_inside_region_are_accepted(
                lat in 12.6933..=13.2827f64,
                lon in 77.0849..=78.1602f64,
            ) {
                prop_assert!(is_in_bounds(point(lat, lon), &REGION));
            }
        }
    }
}
