use axum::extract::{Extension, Json};
use axum_macros::debug_handler;

use crate::entities::{PoiRefresh, Position};
use crate::error::Error;
use crate::server::DynAPI;

#[debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(position): Json<Position>,
) -> Result<Json<PoiRefresh>, Error> {
    let refresh = api.on_location_changed(position).await?;

    Ok(refresh.into())
}

pub async fn current(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Option<Position>>, Error> {
    let position = api.current_position().await;

    Ok(position.into())
}
