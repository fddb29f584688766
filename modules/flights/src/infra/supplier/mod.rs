pub mod http_supplier_client;

pub use http_supplier_client::HttpSupplierClient;
