use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};

/// WGS84 coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Position> for Coord<f64> {
    fn from(position: Position) -> Self {
        Coord {
            x: position.longitude,
            y: position.latitude,
        }
    }
}

impl From<Coord<f64>> for Position {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

impl From<Position> for Point<f64> {
    fn from(position: Position) -> Self {
        Point::new(position.longitude, position.latitude)
    }
}

#[test]
fn converts_to_x_lon_y_lat() {
    use geo_types::{Coord, Point};

    let position = Position::new(12.9, 77.5);
    let coord: Coord<f64> = position.into();

    assert_eq!(coord.x, 77.5);
    assert_eq!(coord.y, 12.9);
    assert_eq!(Position::from(coord), position);

    let point: Point<f64> = position.into();

    assert_eq!(point.x(), 77.5);
    assert_eq!(point.y(), 12.9);
}
