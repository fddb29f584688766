use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{FlightFilter, FlightView, NewFlight};

/// REST DTO for a flight, local or from the supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    /// Store id; `null` for supplier offers
    pub id: Option<i64>,
    pub airline: String,
    pub supplier: String,
    pub fare: f64,
    pub departure_airport: String,
    pub destination_airport: String,
    #[schema(value_type = String, format = DateTime, example = "2025-06-01T08:00:00")]
    pub departure_time: NaiveDateTime,
    #[schema(value_type = String, format = DateTime, example = "2025-06-01T12:00:00")]
    pub arrival_time: NaiveDateTime,
}

/// REST DTO for creating or replacing a flight
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightReq {
    pub airline: String,
    pub supplier: String,
    pub fare: f64,
    /// 3-letter code
    #[schema(example = "LIS")]
    pub departure_airport: String,
    /// 3-letter code
    #[schema(example = "FRA")]
    pub destination_airport: String,
    #[schema(value_type = String, format = DateTime, example = "2025-06-01T08:00:00")]
    pub departure_time: NaiveDateTime,
    #[schema(value_type = String, format = DateTime, example = "2025-06-01T12:00:00")]
    pub arrival_time: NaiveDateTime,
}

/// Search filters for `GET /api/flights`
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct FlightsQuery {
    /// Airline name (exact match, local flights only)
    pub airline: Option<String>,
    /// 3-letter departure airport code
    pub departure_airport: Option<String>,
    /// 3-letter destination airport code
    pub destination_airport: Option<String>,
    /// Earliest departure, ISO-8601 local date-time
    #[param(value_type = Option<String>, format = DateTime)]
    pub departure_time: Option<NaiveDateTime>,
    /// Latest arrival, ISO-8601 local date-time
    #[param(value_type = Option<String>, format = DateTime)]
    pub arrival_time: Option<NaiveDateTime>,
}

/// `?id=` selector for update and delete
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Store id of the flight
    pub id: i64,
}

/// Error body for every 4xx/5xx answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub messages: Vec<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<FlightView> for FlightDto {
    fn from(v: FlightView) -> Self {
        Self {
            id: v.id,
            airline: v.airline,
            supplier: v.supplier,
            fare: v.fare,
            departure_airport: v.departure_airport,
            destination_airport: v.destination_airport,
            departure_time: v.departure_time,
            arrival_time: v.arrival_time,
        }
    }
}

impl From<FlightReq> for NewFlight {
    fn from(req: FlightReq) -> Self {
        Self {
            airline: req.airline,
            supplier: req.supplier,
            fare: req.fare,
            departure_airport: req.departure_airport,
            destination_airport: req.destination_airport,
            departure_time: req.departure_time,
            arrival_time: req.arrival_time,
        }
    }
}

impl From<FlightsQuery> for FlightFilter {
    fn from(q: FlightsQuery) -> Self {
        Self {
            airline: q.airline,
            departure_airport: q.departure_airport,
            destination_airport: q.destination_airport,
            departure_time: q.departure_time,
            arrival_time: q.arrival_time,
        }
    }
}
