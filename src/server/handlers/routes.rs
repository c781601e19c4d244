use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{Position, RoutePath, WaypointAnnotation};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    destination: Position,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<RoutePath>, Error> {
    let route = api.create_route(params.destination).await?;

    Ok(route.into())
}

pub async fn active(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Option<RoutePath>>, Error> {
    let route = api.active_route().await;

    Ok(route.into())
}

pub async fn annotations(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<WaypointAnnotation>>, Error> {
    let annotations = api.annotations().await?;

    Ok(annotations.into())
}
