use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::contract::model::{FlightFilter, FlightView, NewFlight};
use crate::domain::error::DomainError;
use crate::domain::normalizer::{entity_to_view, offer_to_view};
use crate::domain::ports::{SupplierFetch, SupplierPort, SupplierQuery};
use crate::domain::repo::FlightsRepository;

const SEARCH_FAILED: &str = "Error on searching flights";
const SAVE_FAILED: &str = "Error on saving flight";
const UPDATE_FAILED: &str = "Error on updating flight";
const DELETE_FAILED: &str = "Error on deleting flight";

/// Flight aggregation and mutations.
/// Depends only on the repository and supplier ports, not on infra types.
/// Input validation happens before these methods are called.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn FlightsRepository>,
    supplier: Arc<dyn SupplierPort>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn FlightsRepository>, supplier: Arc<dyn SupplierPort>) -> Self {
        Self { repo, supplier }
    }

    /// Local matches first (store order), then supplier offers.
    /// A failing supplier only shortens the list.
    #[instrument(name = "flights.service.get_flights", skip(self))]
    pub async fn get_flights(&self, filter: FlightFilter) -> Result<Vec<FlightView>, DomainError> {
        debug!("Searching flights");

        let local = self.repo.search(&filter).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "Local flight search failed");
            DomainError::technical(SEARCH_FAILED, e)
        })?;
        let local_count = local.len();
        let mut result: Vec<FlightView> = local.into_iter().map(entity_to_view).collect();

        let fetch = self.fetch_supplier_offers(supplier_query(&filter)).await;
        let supplier_count = fetch.offers.len();
        result.extend(fetch.offers.into_iter().map(offer_to_view));

        info!(
            local = local_count,
            supplier = supplier_count,
            "Returning aggregated flights"
        );
        Ok(result)
    }

    /// Never fails: any supplier fault is logged and reported as zero offers.
    #[instrument(name = "flights.service.fetch_supplier_offers", skip(self))]
    pub async fn fetch_supplier_offers(&self, query: SupplierQuery) -> SupplierFetch {
        let fetch = SupplierFetch::from(self.supplier.search_offers(&query).await);
        if let Some(fault) = &fetch.fault {
            error!(
                reason = fault.kind(),
                error = %fault,
                "Error on calling supplier; continuing with local flights only"
            );
        }
        fetch
    }

    #[instrument(
        name = "flights.service.create_flight",
        skip(self, new_flight),
        fields(airline = %new_flight.airline)
    )]
    pub async fn create_flight(&self, new_flight: NewFlight) -> Result<FlightView, DomainError> {
        info!("Creating new flight");

        let saved = self.repo.insert(new_flight).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "{SAVE_FAILED}");
            DomainError::technical(SAVE_FAILED, e)
        })?;

        info!("Successfully created flight with id={}", saved.id);
        Ok(entity_to_view(saved))
    }

    #[instrument(
        name = "flights.service.update_flight",
        skip(self, flight),
        fields(flight_id = id)
    )]
    pub async fn update_flight(&self, id: i64, flight: NewFlight) -> Result<FlightView, DomainError> {
        info!("Updating flight");

        let current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!(error = %format!("{e:#}"), "{UPDATE_FAILED}");
                DomainError::technical(UPDATE_FAILED, e)
            })?
            .ok_or_else(DomainError::flight_not_found)?;

        let updated = self
            .repo
            .update(flight.into_flight(current.id))
            .await
            .map_err(|e| {
                error!(error = %format!("{e:#}"), "{UPDATE_FAILED}");
                DomainError::technical(UPDATE_FAILED, e)
            })?;

        info!("Successfully updated flight");
        Ok(entity_to_view(updated))
    }

    #[instrument(name = "flights.service.delete_flight", skip(self), fields(flight_id = id))]
    pub async fn delete_flight(&self, id: i64) -> Result<(), DomainError> {
        info!("Deleting flight");

        let deleted = self.repo.delete(id).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "{DELETE_FAILED}");
            DomainError::technical(DELETE_FAILED, e)
        })?;

        if deleted {
            info!("Successfully deleted flight");
        } else {
            debug!("No flight with this id; nothing to delete");
        }
        Ok(())
    }
}

/// Airline is never forwarded to the supplier.
fn supplier_query(filter: &FlightFilter) -> SupplierQuery {
    SupplierQuery {
        from: filter.departure_airport.clone(),
        to: filter.destination_airport.clone(),
        outbound_date: filter.departure_time,
        inbound_date: filter.arrival_time,
    }
}
