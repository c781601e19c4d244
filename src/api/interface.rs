use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Poi, PoiCategory, PoiRefresh, Position, RoutePath, WaypointAnnotation};
use crate::error::Error;

#[async_trait]
pub trait LocationAPI {
    async fn on_location_changed(&self, position: Position) -> Result<PoiRefresh, Error>;
    async fn on_location_error(&self, error: Error);
    async fn current_position(&self) -> Option<Position>;
}

#[async_trait]
pub trait PlacesAPI {
    async fn on_category_changed(&self, category: PoiCategory) -> Result<PoiRefresh, Error>;
    async fn fetch_pois(&self, near: Position, category: PoiCategory) -> Result<Vec<Poi>, Error>;
    async fn cached_pois(&self) -> Vec<Poi>;
}

#[async_trait]
pub trait RouteAPI {
    async fn create_route(&self, destination: Position) -> Result<RoutePath, Error>;
    async fn active_route(&self) -> Option<RoutePath>;
    async fn annotations(&self) -> Result<Vec<WaypointAnnotation>, Error>;
}

pub trait API: LocationAPI + PlacesAPI + RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
