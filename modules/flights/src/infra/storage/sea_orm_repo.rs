//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::contract::model::{Flight, FlightFilter, NewFlight};
use crate::domain::repo::FlightsRepository;
use crate::infra::storage::entity::{Column, Entity as FlightEntity};
use crate::infra::storage::mapper::{flight_to_active, new_flight_to_active};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmFlightsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmFlightsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Every present filter becomes one predicate; absent ones add nothing.
fn search_condition(filter: &FlightFilter) -> Condition {
    Condition::all()
        .add_option(filter.airline.clone().map(|v| Column::Airline.eq(v)))
        .add_option(
            filter
                .departure_airport
                .clone()
                .map(|v| Column::DepartureAirport.eq(v)),
        )
        .add_option(
            filter
                .destination_airport
                .clone()
                .map(|v| Column::DestinationAirport.eq(v)),
        )
        .add_option(filter.departure_time.map(|v| Column::DepartureTime.gte(v)))
        .add_option(filter.arrival_time.map(|v| Column::ArrivalTime.lte(v)))
}

#[async_trait::async_trait]
impl<C> FlightsRepository for SeaOrmFlightsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn search(&self, filter: &FlightFilter) -> anyhow::Result<Vec<Flight>> {
        let rows = FlightEntity::find()
            .filter(search_condition(filter))
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("search failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Flight>> {
        let found = FlightEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, new_flight: NewFlight) -> anyhow::Result<Flight> {
        let saved = new_flight_to_active(new_flight)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        Ok(saved.into())
    }

    async fn update(&self, flight: Flight) -> anyhow::Result<Flight> {
        let saved = flight_to_active(flight)
            .update(&self.conn)
            .await
            .context("update failed")?;
        Ok(saved.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = FlightEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
