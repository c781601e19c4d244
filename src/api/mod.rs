mod interface;

pub use interface::{DynAPI, LocationAPI, PlacesAPI, RouteAPI, API};
