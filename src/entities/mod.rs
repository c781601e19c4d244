mod poi;
mod position;
mod route;

pub use poi::{Poi, PoiCategory, PoiRefresh};
pub use position::Position;
pub use route::{RoutePath, WaypointAnnotation};
