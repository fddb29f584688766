use utoipa::OpenApi;

use crate::api::rest::dto::{ErrorResponse, FlightDto, FlightReq};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Flights API", description = "Local flights merged with supplier offers"),
    paths(
        handlers::list_flights,
        handlers::create_flight,
        handlers::update_flight,
        handlers::delete_flight
    ),
    components(schemas(FlightDto, FlightReq, ErrorResponse)),
    tags((name = "flights", description = "Flight search and management"))
)]
pub struct FlightsApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_operation() {
        let v = serde_json::to_value(FlightsApiDoc::openapi()).unwrap();
        let ops = v
            .pointer("/paths/~1api~1flights")
            .and_then(|p| p.as_object())
            .expect("flights path missing");
        for method in ["get", "post", "put", "delete"] {
            assert!(ops.contains_key(method), "missing {method}");
        }
        assert!(v.pointer("/components/schemas/FlightDto").is_some());
        assert!(v.pointer("/components/schemas/ErrorResponse").is_some());
    }
}
