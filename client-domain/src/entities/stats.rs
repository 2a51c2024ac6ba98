// Stats entity
// Aggregate computed by the service; displayed, never derived locally

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub pending: u64,
    #[serde(default)]
    pub processing: u64,
    pub processed: u64,
    pub failed: u64,
    #[serde(default)]
    pub kafka_enabled: bool,
}

impl Stats {
    pub fn mode_label(&self) -> &'static str {
        if self.kafka_enabled {
            "Kafka Mode"
        } else {
            "Demo Mode (In-Memory)"
        }
    }
}
