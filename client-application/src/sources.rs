// Update sources: where service-side changes come from

pub mod polling;
pub mod push;

pub use polling::PollingSource;
pub use push::PushSource;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use client_domain::{StreamSignal, UpdateMode};

use crate::queries::snapshot_queries::Snapshot;
use crate::AppState;

#[derive(Debug)]
pub enum SourceUpdate {
    Snapshot(Snapshot),
    Signal(StreamSignal),
}

/// One way of keeping the view current. Implementations only produce
/// updates; the controller owns every state change.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    fn mode(&self) -> UpdateMode;

    /// Runs until `sink` is closed.
    async fn run(&self, sink: mpsc::Sender<SourceUpdate>);
}

pub fn source_for(state: &AppState) -> Arc<dyn UpdateSource> {
    match state.config.update_mode {
        UpdateMode::Poll => Arc::new(PollingSource::new(state.clone())),
        UpdateMode::Push => Arc::new(PushSource::new(state.event_stream.clone())),
    }
}
