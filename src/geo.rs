use crate::entities::Position;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two positions, in meters.
pub fn haversine_distance(a: Position, b: Position) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[test]
fn zero_distance_at_identical_positions() {
    let p = Position::new(12.9, 77.5);

    assert_eq!(haversine_distance(p, p), 0.0);
}

#[test]
fn one_degree_of_latitude() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(1.0, 0.0);

    let d = haversine_distance(a, b);
    assert!((d - 111_194.9).abs() < 1.0, "got {}", d);
}

#[test]
fn distance_is_symmetric() {
    let a = Position::new(52.52, 13.405);
    let b = Position::new(48.8566, 2.3522);

    assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
}

#[test]
fn berlin_to_paris() {
    let berlin = Position::new(52.52, 13.405);
    let paris = Position::new(48.8566, 2.3522);

    let d = haversine_distance(berlin, paris);
    assert!((d - 878_000.0).abs() < 10_000.0, "got {}", d);
}
