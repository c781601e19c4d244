use crate::entities::{Poi, Position};
use crate::error::Error;
use crate::geo::haversine_distance;

/// The location-triggered refresh policy: refetch on the first fix, then only
/// once the observer has moved more than `threshold_m` from the position the
/// cache was fetched at. The category-triggered path applies no threshold.
#[tracing::instrument]
pub fn should_refresh_pois(
    current: Position,
    last_fetched: Option<Position>,
    threshold_m: f64,
) -> bool {
    match last_fetched {
        Some(last) => haversine_distance(current, last) > threshold_m,
        None => true,
    }
}

/// Compatibility shim for callers that prefer degraded results over errors:
/// a failed fetch and "no POIs nearby" both come back as an empty list.
pub fn pois_or_empty(result: Result<Vec<Poi>, Error>) -> Vec<Poi> {
    match result {
        Ok(pois) => pois,
        Err(err) => {
            tracing::warn!("poi fetch degraded to empty: {:?}", err);
            Vec::new()
        }
    }
}

#[test]
fn the_first_fix_always_refreshes() {
    assert!(should_refresh_pois(Position::new(12.90, 77.50), None, 500.0));
}

#[test]
fn a_move_within_the_threshold_does_not_refresh() {
    let last = Position::new(12.90, 77.50);
    // ~445 m north
    let current = Position::new(12.904, 77.50);

    assert!(!should_refresh_pois(current, Some(last), 500.0));
}

#[test]
fn a_move_past_the_threshold_refreshes() {
    let last = Position::new(12.90, 77.50);
    // ~556 m north
    let current = Position::new(12.905, 77.50);

    assert!(should_refresh_pois(current, Some(last), 500.0));
}

#[test]
fn a_move_of_exactly_the_threshold_does_not_refresh() {
    let last = Position::new(12.90, 77.50);
    let current = Position::new(12.904, 77.50);

    // the comparison is strictly greater-than, so the boundary stays put
    let threshold = haversine_distance(current, last);

    assert!(!should_refresh_pois(current, Some(last), threshold));
}

#[test]
fn standing_still_does_not_refresh() {
    let position = Position::new(12.90, 77.50);

    assert!(!should_refresh_pois(position, Some(position), 500.0));
}

#[test]
fn the_shim_collapses_an_error_to_an_empty_list() {
    use crate::error::upstream_error;

    assert!(pois_or_empty(Err(upstream_error())).is_empty());
}

#[test]
fn the_shim_passes_results_through() {
    let pois = vec![Poi {
        name: "Truffles".into(),
        place_id: "p1".into(),
        distance_m: 120.0,
        position: Position::new(12.93, 77.6),
    }];

    assert_eq!(pois_or_empty(Ok(pois)).len(), 1);
}
