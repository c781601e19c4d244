use serde::{Deserialize, Serialize};

use crate::{
    config::DirectionsConfig,
    entities::{Position, RoutePath},
    error::{invalid_input_error, parse_error, upstream_error, Error},
    polyline,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsResponse {
    status: String,
    routes: Option<Vec<DirectionsRoute>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    overview_polyline: Option<OverviewPolyline>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct OverviewPolyline {
    points: Option<String>,
}

/// Fallback driving directions. The provider returns the route as an encoded
/// polyline string rather than a coordinate list, so the codec does the rest.
#[tracing::instrument(skip(client, config))]
pub async fn fetch_route(
    client: &reqwest::Client,
    config: &DirectionsConfig,
    origin: Position,
    destination: Position,
) -> Result<RoutePath, Error> {
    let url = format!("{}/maps/api/directions/json", config.fallback_api_base);

    let res = client
        .get(url)
        .query(&[(
            "origin",
            format!("{},{}", origin.latitude, origin.longitude),
        )])
        .query(&[(
            "destination",
            format!("{},{}", destination.latitude, destination.longitude),
        )])
        .query(&[("key", &config.fallback_api_key)])
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
    if data.status != "OK" {
        return Err(upstream_error());
    }

    let route = data
        .routes
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| parse_error("empty route list"))?;

    let points = route
        .overview_polyline
        .and_then(|polyline| polyline.points)
        .ok_or_else(|| parse_error("route without an overview polyline"))?;

    let waypoints = polyline::decode(&points)?;

    if waypoints.is_empty() {
        return Err(parse_error("empty polyline"));
    }

    Ok(RoutePath::new(waypoints))
}

#[test]
fn the_overview_polyline_becomes_an_ordered_path() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "status": "OK",
        "routes": [
            { "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" } }
        ]
    }))
    .unwrap();

    let route = route_from_response(data).unwrap();

    assert_eq!(route.waypoints.len(), 3);
    assert_eq!(route.waypoints[0], Position::new(38.5, -120.2));
    assert_eq!(route.waypoints[2], Position::new(43.252, -126.453));
}

#[test]
fn a_non_ok_status_is_an_upstream_error() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "status": "REQUEST_DENIED",
        "routes": []
    }))
    .unwrap();

    assert_eq!(route_from_response(data).err().unwrap().code, 4);
}

#[test]
fn an_empty_route_list_is_a_parse_error() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "status": "OK",
        "routes": []
    }))
    .unwrap();

    assert_eq!(route_from_response(data).err().unwrap().code, 6);
}

#[test]
fn a_malformed_polyline_is_a_parse_error() {
    use serde_json::json;

    let data: DirectionsResponse = serde_json::from_value(json!({
        "status": "OK",
        "routes": [
            { "overview_polyline": { "points": "_p~iF" } }
        ]
    }))
    .unwrap();

    assert_eq!(route_from_response(data).err().unwrap().code, 6);
}
