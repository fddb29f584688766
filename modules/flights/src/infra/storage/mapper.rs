use sea_orm::{ActiveValue::NotSet, Set};

use crate::contract::model::{Flight, NewFlight};
use crate::infra::storage::entity::{ActiveModel, Model};

impl From<Model> for Flight {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            airline: m.airline,
            supplier: m.supplier,
            fare: m.fare,
            departure_airport: m.departure_airport,
            destination_airport: m.destination_airport,
            departure_time: m.departure_time,
            arrival_time: m.arrival_time,
        }
    }
}

/// Insert form: the store assigns the id.
pub fn new_flight_to_active(f: NewFlight) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        airline: Set(f.airline),
        supplier: Set(f.supplier),
        fare: Set(f.fare),
        departure_airport: Set(f.departure_airport),
        destination_airport: Set(f.destination_airport),
        departure_time: Set(f.departure_time),
        arrival_time: Set(f.arrival_time),
    }
}

/// Full replacement keyed by `f.id`.
pub fn flight_to_active(f: Flight) -> ActiveModel {
    ActiveModel {
        id: Set(f.id),
        airline: Set(f.airline),
        supplier: Set(f.supplier),
        fare: Set(f.fare),
        departure_airport: Set(f.departure_airport),
        destination_airport: Set(f.destination_airport),
        departure_time: Set(f.departure_time),
        arrival_time: Set(f.arrival_time),
    }
}
