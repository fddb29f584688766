use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

/// What we ask the supplier for. Airline is not part of the supplier's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub outbound_date: Option<NaiveDateTime>,
    pub inbound_date: Option<NaiveDateTime>,
}

/// One offer in the supplier's own schema. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierOffer {
    pub carrier: String,
    pub base_price: f64,
    pub tax: f64,
    pub departure_airport_name: String,
    pub arrival_airport_name: String,
    pub outbound_date_time: NaiveDateTime,
    pub inbound_date_time: NaiveDateTime,
}

/// Why a supplier call produced no offers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplierError {
    #[error("invalid supplier URL: {0}")]
    InvalidUrl(String),

    #[error("supplier unreachable: {0}")]
    Transport(String),

    #[error("supplier call timed out")]
    Timeout,

    #[error("supplier rejected the request: HTTP {status}")]
    ClientStatus { status: u16 },

    #[error("supplier failed: HTTP {status}")]
    ServerStatus { status: u16 },

    #[error("malformed supplier payload: {0}")]
    Decode(String),
}

impl SupplierError {
    /// Short machine-friendly label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
            Self::ClientStatus { .. } => "client_status",
            Self::ServerStatus { .. } => "server_status",
            Self::Decode(_) => "decode",
        }
    }
}

/// Transport-agnostic supplier port.
#[async_trait]
pub trait SupplierPort: Send + Sync {
    async fn search_offers(&self, query: &SupplierQuery)
        -> Result<Vec<SupplierOffer>, SupplierError>;
}

/// Outcome of a best-effort supplier call: offers on success, the fault otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierFetch {
    pub offers: Vec<SupplierOffer>,
    pub fault: Option<SupplierError>,
}

impl From<Result<Vec<SupplierOffer>, SupplierError>> for SupplierFetch {
    fn from(res: Result<Vec<SupplierOffer>, SupplierError>) -> Self {
        match res {
            Ok(offers) => Self {
                offers,
                fault: None,
            },
            Err(fault) => Self {
                offers: Vec::new(),
                fault: Some(fault),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_call_degrades_to_no_offers() {
        let fetch = SupplierFetch::from(Err(SupplierError::Timeout));
        assert!(fetch.offers.is_empty());
        assert!(fetch.fault.is_some());
        assert_eq!(fetch.fault.as_ref().map(SupplierError::kind), Some("timeout"));
    }

    #[test]
    fn successful_call_has_no_fault() {
        let fetch = SupplierFetch::from(Ok(Vec::new()));
        assert_eq!(fetch.fault, None);
    }
}
