//! Maps both flight sources into [`FlightView`].

use crate::contract::model::{Flight, FlightView};
use crate::domain::ports::SupplierOffer;

/// Supplier label stamped on every offer coming from the external supplier.
pub const SUPPLIER_NAME: &str = "CrazySupplier";

pub fn entity_to_view(flight: Flight) -> FlightView {
    FlightView {
        id: Some(flight.id),
        airline: flight.airline,
        supplier: flight.supplier,
        fare: flight.fare,
        departure_airport: flight.departure_airport,
        destination_airport: flight.destination_airport,
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
    }
}

/// Airport names are passed through as-is; they are not held to the 3-character rule.
pub fn offer_to_view(offer: SupplierOffer) -> FlightView {
    FlightView {
        id: None,
        airline: offer.carrier,
        supplier: SUPPLIER_NAME.to_string(),
        fare: offer.base_price + offer.tax,
        departure_airport: offer.departure_airport_name,
        destination_airport: offer.arrival_airport_name,
        departure_time: offer.outbound_date_time,
        arrival_time: offer.inbound_date_time,
    }
}
