pub mod local;

pub use local::FlightsLocalClient;
