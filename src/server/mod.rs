mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::API;
use crate::server::handlers::{locations, pois, routes};

type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/", get(root))
        .route("/locations", post(locations::create))
        .route("/locations/current", get(locations::current))
        .route("/categories", get(pois::categories).post(pois::change_category))
        .route("/pois", get(pois::cached))
        .route("/pois/search", get(pois::search))
        .route("/routes", post(routes::create))
        .route("/routes/active", get(routes::active))
        .route("/routes/annotations", get(routes::annotations))
        .layer(Extension(api));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn root() -> &'static str {
    "cicerone"
}
