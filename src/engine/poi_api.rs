use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlacesAPI,
    entities::{Poi, PoiCategory, PoiRefresh, Position},
    error::{no_position_error, Error},
    external::geoapify,
};

#[async_trait]
impl PlacesAPI for Engine {
    // Unlike the location path, a category change refetches unconditionally,
    // with no distance threshold and without moving the last-fetched
    // position.
    #[tracing::instrument(skip(self))]
    async fn on_category_changed(&self, category: PoiCategory) -> Result<PoiRefresh, Error> {
        let (ticket, near) = {
            let mut state = self.state.lock().await;
            let near = state.current_position.ok_or_else(|| no_position_error())?;

            (state.begin_category_refresh(category), near)
        };

        let pois = geoapify::fetch_pois(&self.http, &self.config.places, near, category).await?;

        let mut state = self.state.lock().await;

        if !state.commit_pois(ticket, pois) {
            tracing::warn!("category refresh superseded by a newer trigger, discarding result");
            return Ok(PoiRefresh::Superseded);
        }

        Ok(PoiRefresh::Refreshed {
            pois: state.pois.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_pois(&self, near: Position, category: PoiCategory) -> Result<Vec<Poi>, Error> {
        geoapify::fetch_pois(&self.http, &self.config.places, near, category).await
    }

    #[tracing::instrument(skip(self))]
    async fn cached_pois(&self) -> Vec<Poi> {
        self.state.lock().await.pois.clone()
    }
}
