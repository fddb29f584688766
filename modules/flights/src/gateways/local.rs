use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::FlightsApi,
    error::FlightsError,
    model::{FlightFilter, FlightView, NewFlight},
};
use crate::domain::service::Service;
use crate::domain::validation;

/// Local implementation of the FlightsApi trait that delegates to the domain service.
/// Inputs are validated here, the same way the REST layer does.
pub struct FlightsLocalClient {
    service: Arc<Service>,
}

impl FlightsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FlightsApi for FlightsLocalClient {
    async fn get_flights(&self, filter: FlightFilter) -> Result<Vec<FlightView>, FlightsError> {
        validation::validate_filter(&filter)?;
        self.service.get_flights(filter).await.map_err(Into::into)
    }

    async fn create_flight(&self, new_flight: NewFlight) -> Result<FlightView, FlightsError> {
        validation::validate_new_flight(&new_flight)?;
        self.service
            .create_flight(new_flight)
            .await
            .map_err(Into::into)
    }

    async fn update_flight(
        &self,
        id: i64,
        flight: NewFlight,
    ) -> Result<FlightView, FlightsError> {
        validation::validate_new_flight(&flight)?;
        self.service
            .update_flight(id, flight)
            .await
            .map_err(Into::into)
    }

    async fn delete_flight(&self, id: i64) -> Result<(), FlightsError> {
        self.service.delete_flight(id).await.map_err(Into::into)
    }
}
