pub mod supplier;

pub use supplier::{SupplierError, SupplierFetch, SupplierOffer, SupplierPort, SupplierQuery};
