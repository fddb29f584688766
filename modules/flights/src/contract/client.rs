use async_trait::async_trait;

use crate::contract::{
    error::FlightsError,
    model::{FlightFilter, FlightView, NewFlight},
};

/// Public API trait for the flights module that other modules can use
#[async_trait]
pub trait FlightsApi: Send + Sync {
    /// Local flights matching the filter, followed by whatever the supplier offers
    async fn get_flights(&self, filter: FlightFilter) -> Result<Vec<FlightView>, FlightsError>;

    /// Store a new flight; the returned view carries the assigned id
    async fn create_flight(&self, new_flight: NewFlight) -> Result<FlightView, FlightsError>;

    /// Replace every field of an existing flight
    async fn update_flight(&self, id: i64, flight: NewFlight)
        -> Result<FlightView, FlightsError>;

    /// Delete a flight by id; unknown ids are ignored
    async fn delete_flight(&self, id: i64) -> Result<(), FlightsError>;
}
