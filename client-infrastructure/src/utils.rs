use std::time::Duration;

use reqwest::Client;

use client_domain::{ClientConfig, GatewayError};

/// Client for request/response calls, bounded by the request timeout.
pub fn request_client(config: &ClientConfig) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .map_err(|err| GatewayError::Network(err.to_string()))
}

/// Client for the long-lived subscription: connect timeout only.
pub fn streaming_client(config: &ClientConfig) -> Result<Client, GatewayError> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .build()
        .map_err(|err| GatewayError::Network(err.to_string()))
}

/// `base * 2^attempt`, capped at `max`.
pub fn exponential_backoff(base: Duration, max: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt.min(16)))
        .min(max)
}
