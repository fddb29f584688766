use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::config::FlightsConfig;
use crate::domain::ports::{SupplierError, SupplierOffer, SupplierPort, SupplierQuery};
use modkit::TracedClient;

/// Request body in the supplier's wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SupplierRequestBody<'a> {
    from: Option<&'a str>,
    to: Option<&'a str>,
    outbound_date: Option<NaiveDateTime>,
    inbound_date: Option<NaiveDateTime>,
}

/// One element of the supplier's response array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SupplierOfferBody {
    carrier: String,
    base_price: f64,
    tax: f64,
    departure_airport_name: String,
    arrival_airport_name: String,
    outbound_date_time: NaiveDateTime,
    inbound_date_time: NaiveDateTime,
}

impl From<SupplierOfferBody> for SupplierOffer {
    fn from(b: SupplierOfferBody) -> Self {
        Self {
            carrier: b.carrier,
            base_price: b.base_price,
            tax: b.tax,
            departure_airport_name: b.departure_airport_name,
            arrival_airport_name: b.arrival_airport_name,
            outbound_date_time: b.outbound_date_time,
            inbound_date_time: b.inbound_date_time,
        }
    }
}

fn classify(e: reqwest::Error) -> SupplierError {
    if e.is_timeout() {
        SupplierError::Timeout
    } else {
        SupplierError::Transport(e.to_string())
    }
}

/// HTTP adapter implementing the SupplierPort: `POST {base}/flights`.
pub struct HttpSupplierClient {
    client: TracedClient,
    base: Url,
}

impl HttpSupplierClient {
    pub fn new(client: TracedClient, base: Url) -> Self {
        Self { client, base }
    }

    /// Build from module config; the call timeout is baked into the HTTP client.
    pub fn from_config(cfg: &FlightsConfig) -> anyhow::Result<Self> {
        let base = Url::parse(&cfg.supplier_base_url)
            .with_context(|| format!("invalid supplier_base_url '{}'", cfg.supplier_base_url))?;
        let client = TracedClient::with_timeout(cfg.supplier_timeout())
            .context("failed to build supplier HTTP client")?;
        Ok(Self::new(client, base))
    }

    fn flights_url(&self) -> Result<Url, SupplierError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SupplierError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("flights");
        Ok(url)
    }
}

#[async_trait]
impl SupplierPort for HttpSupplierClient {
    #[instrument(
        name = "flights.http.supplier.search_offers",
        skip_all,
        fields(supplier_base = %self.base)
    )]
    async fn search_offers(
        &self,
        query: &SupplierQuery,
    ) -> Result<Vec<SupplierOffer>, SupplierError> {
        let url = self.flights_url()?;
        let body = SupplierRequestBody {
            from: query.from.as_deref(),
            to: query.to.as_deref(),
            outbound_date: query.outbound_date,
            inbound_date: query.inbound_date,
        };

        let response = self
            .client
            .post_json(url.as_str(), &body)
            .await
            .map_err(classify)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(SupplierError::ClientStatus {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(SupplierError::ServerStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        let offers: Vec<SupplierOfferBody> =
            serde_json::from_slice(&bytes).map_err(|e| SupplierError::Decode(e.to_string()))?;

        debug!(count = offers.len(), "Supplier returned offers");
        Ok(offers.into_iter().map(Into::into).collect())
    }
}
