#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use flights::contract::model::NewFlight;
use flights::domain::ports::{SupplierError, SupplierOffer, SupplierPort, SupplierQuery};
use flights::domain::service::Service;
use flights::infra::storage::{migrations::Migrator, SeaOrmFlightsRepository};

/// Fresh in-memory SQLite with migrations applied.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Supplier stand-in that always answers the same way.
pub struct StaticSupplier(pub Result<Vec<SupplierOffer>, SupplierError>);

#[async_trait]
impl SupplierPort for StaticSupplier {
    async fn search_offers(
        &self,
        _query: &SupplierQuery,
    ) -> Result<Vec<SupplierOffer>, SupplierError> {
        self.0.clone()
    }
}

pub fn service_with(db: DatabaseConnection, supplier: impl SupplierPort + 'static) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(SeaOrmFlightsRepository::new(db)),
        Arc::new(supplier),
    ))
}

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn new_flight(airline: &str, from: &str, to: &str, dep: NaiveDateTime, arr: NaiveDateTime) -> NewFlight {
    NewFlight {
        airline: airline.into(),
        supplier: "Direct".into(),
        fare: 199.99,
        departure_airport: from.into(),
        destination_airport: to.into(),
        departure_time: dep,
        arrival_time: arr,
    }
}

pub fn offer(carrier: &str) -> SupplierOffer {
    SupplierOffer {
        carrier: carrier.into(),
        base_price: 80.0,
        tax: 15.5,
        departure_airport_name: "LIS".into(),
        arrival_airport_name: "FRA".into(),
        outbound_date_time: at(1, 9),
        inbound_date_time: at(1, 13),
    }
}
