use tracing::error;

use client_domain::{Event, GatewayError, Stats};

use crate::AppState;

/// Both halves of a full fetch. Each settles on its own; a failed half
/// leaves the matching local state untouched.
#[derive(Debug)]
pub struct Snapshot {
    pub events: Result<Vec<Event>, GatewayError>,
    pub stats: Result<Stats, GatewayError>,
}

pub async fn load_snapshot(state: &AppState) -> Snapshot {
    let (events, stats) = tokio::join!(load_events(state), load_stats(state));
    Snapshot { events, stats }
}

pub async fn load_events(state: &AppState) -> Result<Vec<Event>, GatewayError> {
    state.gateway.list_events().await.map_err(|err| {
        state.metrics.record_request_failure();
        error!(error = %err, "failed to fetch events");
        err
    })
}

pub async fn load_stats(state: &AppState) -> Result<Stats, GatewayError> {
    state.gateway.fetch_stats().await.map_err(|err| {
        state.metrics.record_request_failure();
        error!(error = %err, "failed to fetch stats");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state_with, FakeGateway};
    use std::sync::Arc;

    #[tokio::test]
    async fn halves_fail_independently() {
        let gateway = Arc::new(FakeGateway::default().with_events(2).failing_stats());
        let state = state_with(gateway);

        let snapshot = load_snapshot(&state).await;

        assert_eq!(snapshot.events.expect("events").len(), 2);
        assert!(snapshot.stats.is_err());
        assert_eq!(state.metrics.summary().request_failures, 1);
    }
}
