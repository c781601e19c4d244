pub mod helpers;
pub mod state;

mod location_api;
mod poi_api;
mod route_api;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::api::API;
use crate::config::Config;

use self::state::FetchState;

/// The navigation-overlay engine: the refresh policy, the POI cache and the
/// active route live here, behind one mutex.
pub struct Engine {
    config: Config,
    http: Client,
    state: Mutex<FetchState>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: Config) -> Self {
        let state = FetchState::new(config.default_category);

        Self {
            config,
            http: Client::new(),
            state: Mutex::new(state),
        }
    }
}

impl API for Engine {}

#[cfg(test)]
fn test_engine() -> Engine {
    // unroutable bases so no test ever leaves the machine
    let mut config = Config::default();
    config.places.api_base = "http://127.0.0.1:9".into();
    config.directions.api_base = "http://127.0.0.1:9".into();
    config.directions.fallback_api_base = "http://127.0.0.1:9".into();

    Engine::new(config)
}

#[test]
fn the_first_fix_always_attempts_a_refresh() {
    use crate::api::LocationAPI;
    use crate::entities::Position;
    use tokio_test::block_on;

    let engine = test_engine();

    let result = block_on(engine.on_location_changed(Position::new(12.90, 77.50)));

    let err = result.err().unwrap();
    assert_eq!(err.code, 3);
    assert_eq!(
        block_on(engine.current_position()),
        Some(Position::new(12.90, 77.50))
    );
}

#[test]
fn the_first_refresh_uses_the_injected_default_category() {
    use crate::api::LocationAPI;
    use crate::entities::{PoiCategory, Position};
    use tokio_test::block_on;

    let mut config = Config::default();
    config.default_category = PoiCategory::Tourism;
    config.places.api_base = "http://127.0.0.1:9".into();

    let engine = Engine::new(config);

    assert_eq!(
        block_on(engine.state.lock()).active_category,
        PoiCategory::Tourism
    );

    // the first fix issues a fetch while that category is active
    let err = block_on(engine.on_location_changed(Position::new(12.90, 77.50)))
        .err()
        .unwrap();

    assert_eq!(err.code, 3);
    assert_eq!(
        block_on(engine.state.lock()).active_category,
        PoiCategory::Tourism
    );
}

#[test]
fn a_second_fix_within_the_threshold_is_skipped() {
    use crate::api::{LocationAPI, PlacesAPI};
    use crate::entities::{PoiRefresh, Position};
    use tokio_test::block_on;

    let engine = test_engine();

    // the first trigger fails against the unroutable base but still records
    // its fetch position
    assert!(block_on(engine.on_location_changed(Position::new(12.90, 77.50))).is_err());

    // ~445 m north, under the 500 m threshold
    let outcome = block_on(engine.on_location_changed(Position::new(12.904, 77.50))).unwrap();

    assert!(matches!(outcome, PoiRefresh::Skipped));
    assert!(block_on(engine.cached_pois()).is_empty());
    assert_eq!(
        block_on(engine.current_position()),
        Some(Position::new(12.904, 77.50))
    );
}

#[test]
fn a_fix_past_the_threshold_attempts_another_refresh() {
    use crate::api::LocationAPI;
    use crate::entities::Position;
    use tokio_test::block_on;

    let engine = test_engine();

    assert!(block_on(engine.on_location_changed(Position::new(12.90, 77.50))).is_err());

    // ~1.1 km north, past the threshold, so the fetch goes out again
    let result = block_on(engine.on_location_changed(Position::new(12.91, 77.50)));

    assert_eq!(result.err().unwrap().code, 3);
}

#[test]
fn a_category_change_requires_a_known_position() {
    use crate::api::PlacesAPI;
    use crate::entities::PoiCategory;
    use tokio_test::block_on;

    let engine = test_engine();

    let err = block_on(engine.on_category_changed(PoiCategory::Tourism))
        .err()
        .unwrap();

    assert_eq!(err.code, 102);
}

#[test]
fn a_route_requires_a_known_position() {
    use crate::api::RouteAPI;
    use crate::entities::Position;
    use tokio_test::block_on;

    let engine = test_engine();

    let err = block_on(engine.create_route(Position::new(12.93, 77.62)))
        .err()
        .unwrap();

    assert_eq!(err.code, 102);
}

#[test]
fn annotations_require_an_active_route() {
    use crate::api::RouteAPI;
    use tokio_test::block_on;

    let engine = test_engine();

    let err = block_on(engine.annotations()).err().unwrap();

    assert_eq!(err.code, 100);
}
