use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    engine::helpers::should_refresh_pois,
    entities::{PoiRefresh, Position},
    error::Error,
    external::geoapify,
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn on_location_changed(&self, position: Position) -> Result<PoiRefresh, Error> {
        let (ticket, category) = {
            let mut state = self.state.lock().await;
            state.current_position = Some(position);

            if !should_refresh_pois(
                position,
                state.last_fetched_position,
                self.config.refetch_threshold_m,
            ) {
                return Ok(PoiRefresh::Skipped);
            }

            (state.begin_location_refresh(position), state.active_category)
        };

        // lock released while the request is in flight
        let pois = geoapify::fetch_pois(&self.http, &self.config.places, position, category).await?;

        let mut state = self.state.lock().await;

        if !state.commit_pois(ticket, pois) {
            tracing::warn!("refresh superseded by a newer trigger, discarding result");
            return Ok(PoiRefresh::Superseded);
        }

        Ok(PoiRefresh::Refreshed {
            pois: state.pois.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn on_location_error(&self, error: Error) {
        // positioning failures surface only as an absence of position
        // updates; nothing is recorded beyond the log line
        tracing::warn!("position update failed: {:?}", error);
    }

    #[tracing::instrument(skip(self))]
    async fn current_position(&self) -> Option<Position> {
        self.state.lock().await.current_position
    }
}
