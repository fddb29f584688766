use async_trait::async_trait;

use crate::contract::model::{Flight, FlightFilter, NewFlight};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait FlightsRepository: Send + Sync {
    /// Flights matching every set filter, in insertion order.
    async fn search(&self, filter: &FlightFilter) -> anyhow::Result<Vec<Flight>>;
    /// Load a flight by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Flight>>;
    /// Persist a new flight; the store assigns the id.
    async fn insert(&self, new_flight: NewFlight) -> anyhow::Result<Flight>;
    /// Replace the flight whose primary key is `flight.id`.
    async fn update(&self, flight: Flight) -> anyhow::Result<Flight>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
