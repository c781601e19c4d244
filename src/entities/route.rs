use chrono::{DateTime, Utc};
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Position;
use crate::geo::haversine_distance;

/// An ordered waypoint path from origin to destination. Replaced wholesale
/// when a new route is fetched, never mutated in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutePath {
    pub id: Uuid,
    pub waypoints: Vec<Position>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaypointAnnotation {
    pub remaining_m: f64,
    pub label: Option<String>,
}

impl RoutePath {
    pub fn new(waypoints: Vec<Position>) -> Self {
        Self {
            id: Uuid::new_v4(),
            waypoints,
            created_at: Utc::now(),
        }
    }

    pub fn line_string(&self) -> LineString<f64> {
        LineString::from(
            self.waypoints
                .iter()
                .map(|waypoint| Coord::from(*waypoint))
                .collect::<Vec<_>>(),
        )
    }

    /// Per-waypoint distance remaining to the destination, accumulated
    /// destination-to-origin; the destination itself carries 0.
    ///
    /// A waypoint gets a visible label when it is the destination, or when
    /// the current position is strictly closer to it than its own remaining
    /// distance. That is a proximity heuristic, not path-progress tracking:
    /// waypoints already passed are not excluded, and several waypoints can
    /// carry labels at once. Without a current position only the destination
    /// is labeled.
    pub fn annotate(&self, current: Option<Position>) -> Vec<WaypointAnnotation> {
        let count = self.waypoints.len();
        if count == 0 {
            return Vec::new();
        }

        let mut remaining = vec![0.0_f64; count];
        for index in (0..count - 1).rev() {
            remaining[index] = haversine_distance(self.waypoints[index], self.waypoints[index + 1])
                + remaining[index + 1];
        }

        self.waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| {
                let labeled = index == count - 1
                    || current.map_or(false, |position| {
                        haversine_distance(position, *waypoint) < remaining[index]
                    });

                WaypointAnnotation {
                    remaining_m: remaining[index],
                    label: labeled.then(|| format!("{:.2} meters", remaining[index])),
                }
            })
            .collect()
    }
}

#[test]
fn at_the_destination_only_the_destination_is_labeled() {
    let start = Position::new(12.90, 77.50);
    let destination = Position::new(12.92, 77.50);
    let route = RoutePath::new(vec![start, start, destination]);

    let annotations = route.annotate(Some(destination));

    assert_eq!(annotations.len(), 3);
    assert_eq!(annotations[2].remaining_m, 0.0);
    assert_eq!(annotations[2].label.as_deref(), Some("0.00 meters"));
    assert!(annotations[0].label.is_none());
    assert!(annotations[1].label.is_none());
}

#[test]
fn remaining_distance_accumulates_towards_the_origin() {
    let route = RoutePath::new(vec![
        Position::new(12.90, 77.50),
        Position::new(12.91, 77.50),
        Position::new(12.92, 77.50),
    ]);

    let annotations = route.annotate(None);

    let leg = haversine_distance(Position::new(12.90, 77.50), Position::new(12.91, 77.50));
    assert_eq!(annotations[2].remaining_m, 0.0);
    assert!((annotations[1].remaining_m - leg).abs() < 2.0);
    assert!((annotations[0].remaining_m - 2.0 * leg).abs() < 2.0);
}

#[test]
fn en_route_the_heuristic_labels_the_waypoints_ahead() {
    let route = RoutePath::new(vec![
        Position::new(12.90, 77.50),
        Position::new(12.91, 77.50),
        Position::new(12.92, 77.50),
    ]);

    let annotations = route.annotate(Some(Position::new(12.915, 77.50)));

    assert!(annotations[1].label.is_some());
    assert!(annotations[2].label.is_some());
    // Passed waypoints are not excluded; the start still satisfies the check.
    assert!(annotations[0].label.is_some());
}

#[test]
fn without_a_position_only_the_destination_is_labeled() {
    let route = RoutePath::new(vec![
        Position::new(12.90, 77.50),
        Position::new(12.91, 77.50),
        Position::new(12.92, 77.50),
    ]);

    let annotations = route.annotate(None);

    assert!(annotations[0].label.is_none());
    assert!(annotations[1].label.is_none());
    assert!(annotations[2].label.is_some());
}

#[test]
fn an_empty_path_has_no_annotations() {
    let route = RoutePath::new(Vec::new());

    assert!(route.annotate(None).is_empty());
}

#[test]
fn a_single_waypoint_is_its_own_destination() {
    let route = RoutePath::new(vec![Position::new(12.90, 77.50)]);

    let annotations = route.annotate(None);

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].label.as_deref(), Some("0.00 meters"));
}

#[test]
fn line_string_preserves_waypoint_order() {
    let route = RoutePath::new(vec![
        Position::new(12.90, 77.50),
        Position::new(12.91, 77.51),
    ]);

    let line = route.line_string();

    assert_eq!(line.0.len(), 2);
    assert_eq!(line.0[0].x, 77.50);
    assert_eq!(line.0[0].y, 12.90);
    assert_eq!(line.0[1].x, 77.51);
}
