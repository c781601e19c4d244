use serde::{Deserialize, Serialize};

use crate::{
    config::PlacesConfig,
    entities::{Poi, PoiCategory, Position},
    error::{invalid_input_error, upstream_error, Error},
    geo::haversine_distance,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct FeatureCollection {
    features: Option<Vec<Feature>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Feature {
    properties: Option<Properties>,
    geometry: Option<FeatureGeometry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Properties {
    name: Option<String>,
    place_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct FeatureGeometry {
    coordinates: Option<Vec<f64>>,
}

/// Bounded-radius, bounded-count places query biased towards `near`. Each
/// returned POI carries its distance from `near` as computed now, at fetch
/// time; it is not recomputed when the observer moves.
#[tracing::instrument(skip(client, config))]
pub async fn fetch_pois(
    client: &reqwest::Client,
    config: &PlacesConfig,
    near: Position,
    category: PoiCategory,
) -> Result<Vec<Poi>, Error> {
    let url = format!("{}/v2/places", config.api_base);

    let res = client
        .get(url)
        .query(&[("categories", category.slug())])
        .query(&[(
            "filter",
            format!(
                "circle:{},{},{}",
                near.longitude, near.latitude, config.radius_m
            ),
        )])
        .query(&[(
            "bias",
            format!("proximity:{},{}", near.longitude, near.latitude),
        )])
        .query(&[("limit", config.limit)])
        .query(&[("apiKey", &config.api_key)])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let body = res.text().await?;
    let data: FeatureCollection = serde_json::from_str(&body)?;

    Ok(collect_pois(data, near))
}

// Features missing a name, a geometry or a full coordinate pair are skipped,
// not treated as errors; the well-formed remainder is kept.
fn collect_pois(data: FeatureCollection, near: Position) -> Vec<Poi> {
    let mut pois = Vec::new();

    for feature in data.features.unwrap_or_default() {
        let properties = match feature.properties {
            Some(properties) => properties,
            None => continue,
        };

        let name = match properties.name {
            Some(name) => name,
            None => continue,
        };

        let coordinates = match feature.geometry.and_then(|geometry| geometry.coordinates) {
            Some(coordinates) if coordinates.len() >= 2 => coordinates,
            _ => continue,
        };

        // coordinates arrive as [lon, lat]
        let position = Position::new(coordinates[1], coordinates[0]);

        pois.push(Poi {
            name,
            place_id: properties.place_id.unwrap_or_default(),
            distance_m: haversine_distance(near, position),
            position,
        });
    }

    pois
}

#[test]
fn a_feature_missing_its_geometry_is_skipped() {
    use serde_json::json;

    let near = Position::new(12.9, 77.5);

    let data: FeatureCollection = serde_json::from_value(json!({
        "features": [
            {
                "properties": { "name": "Truffles", "place_id": "51a0c2" },
                "geometry": { "type": "Point", "coordinates": [77.6, 12.93] }
            },
            {
                "properties": { "name": "Corner House" }
            }
        ]
    }))
    .unwrap();

    let pois = collect_pois(data, near);

    assert_eq!(pois.len(), 1);
    assert_eq!(pois[0].name, "Truffles");
    assert_eq!(pois[0].place_id, "51a0c2");

    let expected = haversine_distance(near, Position::new(12.93, 77.6));
    assert!((pois[0].distance_m - expected).abs() < 1.0);
}

#[test]
fn a_feature_missing_its_name_is_skipped() {
    use serde_json::json;

    let data: FeatureCollection = serde_json::from_value(json!({
        "features": [
            {
                "properties": { "place_id": "51a0c2" },
                "geometry": { "coordinates": [77.6, 12.93] }
            },
            {
                "properties": { "name": "Corner House" },
                "geometry": { "coordinates": [77.61, 12.935] }
            }
        ]
    }))
    .unwrap();

    let pois = collect_pois(data, Position::new(12.9, 77.5));

    assert_eq!(pois.len(), 1);
    assert_eq!(pois[0].name, "Corner House");
}

#[test]
fn a_short_coordinate_array_is_skipped() {
    use serde_json::json;

    let data: FeatureCollection = serde_json::from_value(json!({
        "features": [
            {
                "properties": { "name": "Truffles" },
                "geometry": { "coordinates": [77.6] }
            }
        ]
    }))
    .unwrap();

    assert!(collect_pois(data, Position::new(12.9, 77.5)).is_empty());
}

#[test]
fn a_missing_place_id_becomes_an_empty_string() {
    use serde_json::json;

    let data: FeatureCollection = serde_json::from_value(json!({
        "features": [
            {
                "properties": { "name": "Truffles" },
                "geometry": { "coordinates": [77.6, 12.93] }
            }
        ]
    }))
    .unwrap();

    let pois = collect_pois(data, Position::new(12.9, 77.5));

    assert_eq!(pois[0].place_id, "");
}

#[test]
fn an_empty_collection_yields_no_pois() {
    use serde_json::json;

    let data: FeatureCollection = serde_json::from_value(json!({})).unwrap();

    assert!(collect_pois(data, Position::new(12.9, 77.5)).is_empty());
}
