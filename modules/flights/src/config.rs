use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the flights module (`modules.flights`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightsConfig {
    #[serde(default = "default_supplier_base_url")]
    pub supplier_base_url: String,
    /// Overall deadline for one supplier call; exceeding it counts as a supplier failure.
    #[serde(default = "default_supplier_timeout_ms")]
    pub supplier_timeout_ms: u64,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self {
            supplier_base_url: default_supplier_base_url(),
            supplier_timeout_ms: default_supplier_timeout_ms(),
        }
    }
}

impl FlightsConfig {
    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_millis(self.supplier_timeout_ms)
    }
}

fn default_supplier_base_url() -> String {
    "http://crazy-supplier.local".to_string()
}

fn default_supplier_timeout_ms() -> u64 {
    5000
}
