use async_channel::{Receiver, Sender};
use rand_distr::{Binomial, Distribution, Normal, Uniform};
use std::sync::Arc;

use crate::api::{LocationAPI, PlacesAPI, RouteAPI};
use crate::engine::Engine;
use crate::entities::{PoiCategory, PoiRefresh, Position, RoutePath};
use crate::error::{permission_error, Error};

// MG Road down to Koramangala, a short city walk with dense POI coverage.
const WALK_ORIGIN: Position = Position {
    latitude: 12.9757,
    longitude: 77.6066,
};
const WALK_DESTINATION: Position = Position {
    latitude: 12.9352,
    longitude: 77.6245,
};

// ~5 m of GPS noise, expressed in degrees
const GPS_JITTER_SIGMA_DEG: f64 = 0.00005;

const FIX_INTERVAL_MS: u64 = 750;

fn sample_binomial(n: u64, p: f64) -> u64 {
    let bin = Binomial::new(n, p).unwrap();
    bin.sample(&mut rand::thread_rng())
}

fn handle_fetch_error(err: Error) {
    if err.code >= 100 {
        panic!("unexpected error");
    }

    tracing::warn!("fetch failed: {:?}", err);
}

struct Simulation {
    e: Engine,
}

impl Simulation {
    #[tracing::instrument(skip(self))]
    fn jittered(&self, position: Position) -> Position {
        let mut rng = rand::thread_rng();
        let noise = Normal::new(0.0, GPS_JITTER_SIGMA_DEG).unwrap();

        Position::new(
            position.latitude + noise.sample(&mut rng),
            position.longitude + noise.sample(&mut rng),
        )
    }

    #[tracing::instrument(skip(self))]
    fn sample_category(&self) -> PoiCategory {
        let die = Uniform::from(0..PoiCategory::all().len());
        let index = die.sample(&mut rand::thread_rng());

        PoiCategory::all()[index]
    }

    #[tracing::instrument(skip(self))]
    async fn report_fix(&self, fix: Position) {
        match self.e.on_location_changed(fix).await {
            Ok(PoiRefresh::Refreshed { pois }) => {
                tracing::info!("refreshed cache with {} POIs", pois.len());
            }
            Ok(PoiRefresh::Superseded) => {
                tracing::info!("refresh superseded by a newer fix");
            }
            Ok(PoiRefresh::Skipped) => {}
            Err(err) => handle_fetch_error(err),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn flip_category(&self) {
        let category = self.sample_category();

        tracing::info!("switching category to {:?}", category);

        match self.e.on_category_changed(category).await {
            Ok(PoiRefresh::Refreshed { pois }) => {
                tracing::info!("refetched {} POIs for {:?}", pois.len(), category);
            }
            Ok(_) => {}
            Err(err) => handle_fetch_error(err),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn report_annotations(&self) {
        match self.e.annotations().await {
            Ok(annotations) => {
                let labeled = annotations
                    .iter()
                    .filter(|annotation| annotation.label.is_some())
                    .count();

                tracing::info!("{} of {} waypoints labeled", labeled, annotations.len());
            }
            Err(err) => handle_fetch_error(err),
        }
    }
}

/// Headless stand-in for the positioning subsystem: walks a real route,
/// feeding jittered fixes to the engine the way the device's location
/// callbacks would. Needs live API keys.
pub struct Executor {
    s: Arc<Simulation>,
}

impl Executor {
    #[tracing::instrument(name = "Executor::new", skip_all)]
    pub fn new(e: Engine) -> Self {
        Self {
            s: Arc::new(Simulation { e }),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) {
        let route = self.prepare_route().await;
        self.walk(route).await;
    }

    #[tracing::instrument(skip(self))]
    async fn prepare_route(&self) -> RoutePath {
        let s = self.s.clone();

        // the first fix primes the tracker so route creation has an origin
        s.report_fix(WALK_ORIGIN).await;

        let route = s.e.create_route(WALK_DESTINATION).await.unwrap();

        tracing::info!("walking {} waypoints", route.waypoints.len());

        route
    }

    #[tracing::instrument(skip(self, route))]
    async fn walk(&self, route: RoutePath) {
        let (tx, rx): (Sender<Position>, Receiver<Position>) = async_channel::unbounded();

        let mut handles = vec![];

        for _ in 0..3 {
            let rx = rx.clone();
            let s = self.s.clone();

            let handle = tokio::spawn(async move {
                while let Ok(fix) = rx.recv().await {
                    s.report_fix(fix).await;

                    if sample_binomial(1, 0.05) > 0 {
                        s.flip_category().await;
                    }

                    if sample_binomial(1, 0.02) > 0 {
                        // the positioning subsystem occasionally withholds a fix
                        s.e.on_location_error(permission_error()).await;
                    }

                    s.report_annotations().await;
                }
            });

            handles.push(handle);
        }

        let s = self.s.clone();

        handles.push(tokio::spawn(async move {
            for waypoint in route.waypoints {
                tx.send(s.jittered(waypoint)).await.unwrap();

                tokio::time::sleep(tokio::time::Duration::from_millis(FIX_INTERVAL_MS)).await;
            }
        }));

        futures::future::join_all(handles).await;
    }
}
