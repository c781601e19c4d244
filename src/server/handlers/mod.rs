pub mod locations;
pub mod pois;
pub mod routes;
