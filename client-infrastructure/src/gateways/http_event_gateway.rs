use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use client_domain::ports::EventGateway;
use client_domain::{ClientConfig, Event, EventDraft, EventId, EventStatus, GatewayError, Stats};

use crate::utils::request_client;

const EVENTS_PATH: &str = "/api/events";
const STATS_PATH: &str = "/api/events/stats";

/// Error body the service sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

pub struct HttpEventGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpEventGateway {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = request_client(&config)?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "service error body");
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        Err(GatewayError::Service {
            status: status.as_u16(),
            message: parsed.message,
            field_errors: parsed.errors,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| GatewayError::Network(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
}

#[async_trait]
impl EventGateway for HttpEventGateway {
    async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
        self.get_json(EVENTS_PATH).await
    }

    async fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<Event>, GatewayError> {
        self.get_json(&format!("{}/status/{}", EVENTS_PATH, status.as_str()))
            .await
    }

    async fn get_event(&self, id: EventId) -> Result<Event, GatewayError> {
        self.get_json(&format!("{}/{}", EVENTS_PATH, id)).await
    }

    async fn fetch_stats(&self) -> Result<Stats, GatewayError> {
        self.get_json(STATS_PATH).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, GatewayError> {
        let request = self.client.post(self.url(EVENTS_PATH)).json(draft);
        let response = self.send(request).await?;
        read_json(response).await
    }

    async fn clear_events(&self) -> Result<(), GatewayError> {
        self.send(self.client.delete(self.url(EVENTS_PATH))).await?;
        Ok(())
    }
}
