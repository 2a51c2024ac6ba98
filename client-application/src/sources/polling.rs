use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use client_domain::UpdateMode;

use super::{SourceUpdate, UpdateSource};
use crate::queries::snapshot_queries::load_snapshot;
use crate::AppState;

/// Re-fetches the whole snapshot every `poll_interval`.
pub struct PollingSource {
    state: AppState,
    period: Duration,
}

impl PollingSource {
    pub fn new(state: AppState) -> Self {
        let period = state.config.poll_interval();
        Self { state, period }
    }
}

#[async_trait]
impl UpdateSource for PollingSource {
    fn mode(&self) -> UpdateMode {
        UpdateMode::Poll
    }

    async fn run(&self, sink: mpsc::Sender<SourceUpdate>) {
        // the controller already issued the startup fetch
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = sink.closed() => break,
                _ = ticker.tick() => {}
            }
            let snapshot = load_snapshot(&self.state).await;
            if sink.send(SourceUpdate::Snapshot(snapshot)).await.is_err() {
                break;
            }
        }
        debug!("polling source stopped");
    }
}
