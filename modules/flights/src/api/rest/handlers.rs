use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use crate::api::rest::dto::{ErrorResponse, FlightDto, FlightReq, FlightsQuery, IdQuery};
use crate::api::rest::error::ApiError;
use crate::contract::model::{FlightFilter, NewFlight};
use crate::domain::service::Service;
use crate::domain::validation;

type ApiResult<T> = Result<T, ApiError>;

fn query_of<T>(q: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    q.map(|Query(v)| v)
        .map_err(|rej| ApiError::bad_request(rej.body_text()))
}

fn body_of<T>(b: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    b.map(|Json(v)| v)
        .map_err(|rej| ApiError::bad_request(rej.body_text()))
}

/// List local flights matching the filters, followed by supplier offers
#[utoipa::path(
    get,
    path = "/api/flights",
    tag = "flights",
    params(FlightsQuery),
    responses(
        (status = 200, description = "Local flights first, then supplier offers", body = [FlightDto]),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn list_flights(
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<FlightsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<FlightDto>>> {
    let filter: FlightFilter = query_of(query)?.into();
    info!("Listing flights with filter: {:?}", filter);
    validation::validate_filter(&filter)?;

    let flights = svc.get_flights(filter).await?;
    Ok(Json(flights.into_iter().map(FlightDto::from).collect()))
}

/// Create a new flight
#[utoipa::path(
    post,
    path = "/api/flights",
    tag = "flights",
    request_body = FlightReq,
    responses(
        (status = 201, description = "Created flight", body = FlightDto),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn create_flight(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<FlightReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FlightDto>)> {
    let req_body = body_of(body)?;
    info!("Creating flight: {:?}", req_body);
    let new_flight: NewFlight = req_body.into();
    validation::validate_new_flight(&new_flight)?;

    let flight = svc.create_flight(new_flight).await?;
    Ok((StatusCode::CREATED, Json(FlightDto::from(flight))))
}

/// Replace every field of an existing flight
#[utoipa::path(
    put,
    path = "/api/flights",
    tag = "flights",
    params(IdQuery),
    request_body = FlightReq,
    responses(
        (status = 200, description = "Updated flight", body = FlightDto),
        (status = 400, description = "Bad Request or unknown flight", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn update_flight(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Json<FlightReq>, JsonRejection>,
) -> ApiResult<Json<FlightDto>> {
    let IdQuery { id } = query_of(id)?;
    let req_body = body_of(body)?;
    info!("Updating flight {} with: {:?}", id, req_body);
    let flight: NewFlight = req_body.into();
    validation::validate_new_flight(&flight)?;

    let updated = svc.update_flight(id, flight).await?;
    Ok(Json(FlightDto::from(updated)))
}

/// Delete a flight by id
#[utoipa::path(
    delete,
    path = "/api/flights",
    tag = "flights",
    params(IdQuery),
    responses(
        (status = 204, description = "Flight deleted (or never existed)"),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn delete_flight(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let IdQuery { id } = query_of(id)?;
    info!("Deleting flight: {}", id);

    svc.delete_flight(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
