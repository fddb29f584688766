use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount path for every flight operation.
pub const FLIGHTS_PATH: &str = "/api/flights";

/// All flight operations share one path; the method (and `?id=`) selects the operation.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            FLIGHTS_PATH,
            get(handlers::list_flights)
                .post(handlers::create_flight)
                .put(handlers::update_flight)
                .delete(handlers::delete_flight),
        )
        .layer(Extension(service))
}
