use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{LocationAPI, RouteAPI},
    entities::{Position, RoutePath, WaypointAnnotation},
    error::{invalid_state_error, no_position_error, Error},
    external::{google_directions, openrouteservice},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_route(&self, destination: Position) -> Result<RoutePath, Error> {
        let origin = self
            .current_position()
            .await
            .ok_or_else(|| no_position_error())?;

        let route = match openrouteservice::fetch_route(
            &self.http,
            &self.config.directions,
            origin,
            destination,
        )
        .await
        {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!("primary directions fetch failed, trying fallback: {:?}", err);

                google_directions::fetch_route(
                    &self.http,
                    &self.config.directions,
                    origin,
                    destination,
                )
                .await?
            }
        };

        tracing::info!("created route with {} waypoints", route.waypoints.len());

        self.state.lock().await.route = Some(route.clone());

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn active_route(&self) -> Option<RoutePath> {
        self.state.lock().await.route.clone()
    }

    #[tracing::instrument(skip(self))]
    async fn annotations(&self) -> Result<Vec<WaypointAnnotation>, Error> {
        let state = self.state.lock().await;
        let route = state.route.as_ref().ok_or_else(|| invalid_state_error())?;

        Ok(route.annotate(state.current_position))
    }
}
