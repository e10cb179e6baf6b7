use axum::{
    routing::{get, on},
    Router,
};
use model::{ride::Ride, WithId};

pub mod rides;

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schema/ride", get(schema::<WithId<Ride>>))
        .nest_service("/rides", rides::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn health() -> &'static str {
    "Healthy"
}
