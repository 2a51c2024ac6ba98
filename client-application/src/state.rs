use std::sync::Arc;

use client_domain::ports::{ConfirmPrompt, EventGateway, EventStream};
use client_domain::ClientConfig;

use crate::ClientMetrics;

#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub gateway: Arc<dyn EventGateway>,
    pub event_stream: Arc<dyn EventStream>,
    pub confirm: Arc<dyn ConfirmPrompt>,
    pub metrics: Arc<ClientMetrics>,
}
