pub mod geoapify;
pub mod google_directions;
pub mod openrouteservice;
