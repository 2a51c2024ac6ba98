use httpmock::MockServer;
use serde_json::{json, Value};

use client_domain::ClientConfig;

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        api_base_url: server.base_url(),
        request_timeout_seconds: 5,
        connect_timeout_seconds: 2,
        reconnect_delay_ms: 20,
        reconnect_max_delay_ms: 40,
        ..ClientConfig::default()
    }
}

#[allow(dead_code)]
pub fn event_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "paid",
        "source": "web-app",
        "type": "USER_ACTION",
        "status": status,
        "createdAt": "2025-03-05T14:03:22.123456",
        "processedAt": null,
        "retryCount": 0
    })
}
