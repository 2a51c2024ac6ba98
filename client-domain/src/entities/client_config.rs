// Client configuration entity
// Resolved settings injected into every component at construction

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::value_objects::{EventType, UpdateMode};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SOURCE: &str = "eventhub-cli";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3_000;
pub const DEFAULT_RECONNECT_MAX_DELAY_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub update_mode: UpdateMode,
    pub poll_interval_ms: u64,
    pub notification_ttl_ms: u64,
    pub request_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub reconnect_delay_ms: u64,
    pub reconnect_max_delay_ms: u64,
    pub default_source: String,
    pub default_type: EventType,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            update_mode: UpdateMode::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            reconnect_max_delay_ms: DEFAULT_RECONNECT_MAX_DELAY_MS,
            default_source: DEFAULT_SOURCE.to_string(),
            default_type: EventType::default(),
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
