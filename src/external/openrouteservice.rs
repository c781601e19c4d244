use serde::{Deserialize, Serialize};

use crate::{
    config::DirectionsConfig,
    entities::{Position, RoutePath},
    error::{invalid_input_error, parse_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsResponse {
    features: Option<Vec<DirectionsFeature>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsFeature {
    geometry: Option<DirectionsGeometry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsGeometry {
    coordinates: Option<Vec<Vec<f64>>>,
}

/// Driving directions from the primary provider, parsed from the GeoJSON
/// coordinate list into an origin-to-destination waypoint path.
#[tracing::instrument(skip(client, config))]
pub async fn fetch_route(
    client: &reqwest::Client,
    config: &DirectionsConfig,
    origin: Position,
    destination: Position,
) -> Result<RoutePath, Error> {
    let url = format!("{}/v2/directions/driving-car", config.api_base);

    let res = client
        .get(url)
        .query(&[("api_key", &config.api_key)])
        .query(&[(
            "start",
            format!("{},{}", origin.longitude, origin.latitude),
        )])
        .query(&[(
            "end",
            format!("{},{}", destination.longitude, destination.latitude),
        )])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let body = res.text().await?;
    let data: DirectionsResponse = serde_json::from_str(&body)?;

    route_from_response(data)
}

fn route_from_response(data: DirectionsResponse) -> Result<RoutePath, Error> {
    let feature = data
        .features
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| parse_error("no route features"))?;

    let coordinates = feature
        .geometry
        .and_then(|geometry| geometry.coordinates)
        .ok_or_else(|| parse_error("route feature without geometry"))?;

    // entries arrive as [lon, lat]; anything of unexpected arity is skipped
    let waypoints: Vec<Position> = coordinates
        .iter()
        .filter(|pair| pair.len() == 2)
        .map(|pair| Position::new(pair[1], pair[0]))
        .collect();

    if waypoints.is_empty() {
        return Err(parse_error("empty coordinate list"));
    }

    Ok(RoutePath::new(waypoints))
}

#[test]
fn the_coordinate_list_becomes_an_ordered_path() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "features": [
            {
                "geometry": {
                    "coordinates": [[77.5946, 12.9716], [77.60, 12.96], [77.6245, 12.9352]]
                }
            }
        ]
    }))
    .unwrap();

    let route = route_from_response(data).unwrap();

    assert_eq!(route.waypoints.len(), 3);
    assert_eq!(route.waypoints[0], Position::new(12.9716, 77.5946));
    assert_eq!(route.waypoints[2], Position::new(12.9352, 77.6245));
}

#[test]
fn entries_of_unexpected_arity_are_skipped() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "features": [
            {
                "geometry": {
                    "coordinates": [[77.5946, 12.9716], [77.60], [77.6245, 12.9352, 0.0]]
                }
            }
        ]
    }))
    .unwrap();

    let route = route_from_response(data).unwrap();

    assert_eq!(route.waypoints.len(), 1);
}

#[test]
fn an_empty_feature_list_is_a_parse_error() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({ "features": [] })).unwrap();

    assert_eq!(route_from_response(data).err().unwrap().code, 6);
}

#[test]
fn a_feature_without_geometry_is_a_parse_error() {
    use serde_json::json;

    let data: DirectionsResponse =
        serde_json::from_value(json!({ "features": [{}] })).unwrap();

    assert_eq!(route_from_response(data).err().unwrap().code, 6);
}
