use std::sync::Arc;

use anyhow::Result;

use client_application::{AppState, ClientMetrics};
use client_domain::{ClientConfig, UpdateMode};
use client_infrastructure::{AppConfig, HttpEventGateway, SseEventStream};
use client_interfaces_cli::StdinConfirm;

/// Command-line values that win over the config file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub mode: Option<UpdateMode>,
}

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(overrides: &Overrides) -> Result<Self> {
        let config = apply_overrides(AppConfig::load().await?, overrides)?;
        Self::from_config(config.to_client_config())
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let gateway = Arc::new(HttpEventGateway::new(config.clone())?);
        let event_stream = Arc::new(SseEventStream::new(&config)?);

        let state = AppState {
            config,
            gateway,
            event_stream,
            confirm: Arc::new(StdinConfirm),
            metrics: Arc::new(ClientMetrics::default()),
        };

        Ok(Self { state })
    }
}

fn apply_overrides(mut config: AppConfig, overrides: &Overrides) -> Result<AppConfig> {
    if let Some(url) = &overrides.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(mode) = overrides.mode {
        config.update_mode = mode.to_string();
    }
    config.finalize()
}
