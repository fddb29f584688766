pub mod client;
pub mod error;
pub mod model;

pub use client::FlightsApi;
pub use error::FlightsError;
pub use model::{Flight, FlightFilter, FlightView, NewFlight};
