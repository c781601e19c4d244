use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{Poi, PoiCategory, PoiRefresh, Position};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ChangeCategoryParams {
    category: PoiCategory,
}

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    latitude: f64,
    longitude: f64,
    category: PoiCategory,
}

#[derive(Serialize, Deserialize)]
pub struct CategoryInfo {
    category: PoiCategory,
    display_name: String,
}

pub async fn categories() -> Result<Json<Vec<CategoryInfo>>, Error> {
    let catalog: Vec<CategoryInfo> = PoiCategory::all()
        .iter()
        .map(|category| CategoryInfo {
            category: *category,
            display_name: category.display_name().into(),
        })
        .collect();

    Ok(catalog.into())
}

pub async fn change_category(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ChangeCategoryParams>,
) -> Result<Json<PoiRefresh>, Error> {
    let refresh = api.on_category_changed(params.category).await?;

    Ok(refresh.into())
}

pub async fn cached(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Poi>>, Error> {
    let pois = api.cached_pois().await;

    Ok(pois.into())
}

// Stateless lookup: fetches for the given coordinate without touching the
// tracker or the cache.
pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Poi>>, Error> {
    let near = Position::new(params.latitude, params.longitude);
    let pois = api.fetch_pois(near, params.category).await?;

    Ok(pois.into())
}
