use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::debug;

use client_domain::ports::EventStream;
use client_domain::UpdateMode;

use super::{SourceUpdate, UpdateSource};

/// Forwards subscription signals. Reconnecting is the stream's job.
pub struct PushSource {
    stream: Arc<dyn EventStream>,
}

impl PushSource {
    pub fn new(stream: Arc<dyn EventStream>) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl UpdateSource for PushSource {
    fn mode(&self) -> UpdateMode {
        UpdateMode::Push
    }

    async fn run(&self, sink: mpsc::Sender<SourceUpdate>) {
        let mut signals = self.stream.subscribe();
        loop {
            let signal = tokio::select! {
                _ = sink.closed() => break,
                signal = signals.next() => signal,
            };
            let Some(signal) = signal else {
                break;
            };
            if sink.send(SourceUpdate::Signal(signal)).await.is_err() {
                break;
            }
        }
        // dropping `signals` closes the connection
        debug!("push source stopped");
    }
}
