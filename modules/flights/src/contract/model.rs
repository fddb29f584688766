use chrono::NaiveDateTime;

/// Locally stored flight (no serde/schemars; REST has its own DTOs).
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: i64,
    pub airline: String,
    pub supplier: String,
    pub fare: f64,
    pub departure_airport: String,
    pub destination_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

/// Data for creating a flight, or for replacing every field of an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlight {
    pub airline: String,
    pub supplier: String,
    pub fare: f64,
    pub departure_airport: String,
    pub destination_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl NewFlight {
    pub fn into_flight(self, id: i64) -> Flight {
        Flight {
            id,
            airline: self.airline,
            supplier: self.supplier,
            fare: self.fare,
            departure_airport: self.departure_airport,
            destination_airport: self.destination_airport,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
        }
    }
}

/// Search criteria. `None` constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub airline: Option<String>,
    pub departure_airport: Option<String>,
    pub destination_airport: Option<String>,
    /// Inclusive lower bound on departure.
    pub departure_time: Option<NaiveDateTime>,
    /// Inclusive upper bound on arrival.
    pub arrival_time: Option<NaiveDateTime>,
}

/// Unified shape for local and supplier flights. `id` is `None` for supplier offers.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightView {
    pub id: Option<i64>,
    pub airline: String,
    pub supplier: String,
    pub fare: f64,
    pub departure_airport: String,
    pub destination_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}
