pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use openapi::FlightsApiDoc;
pub use routes::router;
