use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::{Method, StatusCode},
    routing::{get, on},
    Json, Router,
};
use log::debug;
use model::{
    pagination::{Pagination, RidePage},
    ride::Ride,
    WithId,
};
use utility::id::Id;

use crate::{
    common::{route_not_found, JsonResult, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_rides).post(create_ride))
        .route("/:id", get(get_ride))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn create_ride(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { rides }): State<WebState>,
    body: Result<Json<Ride>, JsonRejection>,
) -> RouteResult<(StatusCode, Json<WithId<Ride>>)> {
    let error = |status_code| {
        RouteErrorResponse::new(status_code)
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    };

    let Json(ride) = body.map_err(|why| {
        error(StatusCode::BAD_REQUEST)
            .with_message(format!("Malformed request body: {}", why.body_text()))
    })?;

    if let Err(why) = ride.validate() {
        debug!("rejected ride: {}", why);
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY)
            .with_message(format!("Invalid request body: {}", why)));
    }

    let id = rides.insert_ride(&ride).await.map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    })?;

    Ok((StatusCode::CREATED, Json(WithId::new(id, ride))))
}

async fn get_rides(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { rides }): State<WebState>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> JsonResult<RidePage> {
    let Query(pagination) = pagination.map_err(|why| {
        RouteErrorResponse::new(StatusCode::BAD_REQUEST)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
            .with_message(format!("Bad request: {}", why.body_text()))
    })?;

    rides
        .get_rides(&pagination)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_ride(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { rides }): State<WebState>,
) -> JsonResult<WithId<Ride>> {
    let error = |status_code| {
        RouteErrorResponse::new(status_code)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    };

    let ride_id: Id<Ride> = id.parse().map_err(|why| {
        error(StatusCode::UNPROCESSABLE_ENTITY).with_message(format!("Invalid ID: {}", why))
    })?;

    rides
        .get_ride(ride_id)
        .await
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })?
        .map(Json)
        .ok_or_else(|| {
            error(StatusCode::NOT_FOUND).with_message(format!("Can't find ride with ID {}", id))
        })
}
