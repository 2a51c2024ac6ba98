use tracing::warn;

use client_domain::{Event, EventId, EventStatus, Stats};

use crate::{AppError, AppState};

pub async fn list_events(
    state: &AppState,
    status: Option<EventStatus>,
) -> Result<Vec<Event>, AppError> {
    let result = match status {
        Some(status) => state.gateway.list_events_by_status(status).await,
        None => state.gateway.list_events().await,
    };
    result.map_err(|err| {
        state.metrics.record_request_failure();
        warn!(status = ?status, error = %err, "failed to list events");
        AppError::from(err)
    })
}

pub async fn get_event(state: &AppState, id: EventId) -> Result<Event, AppError> {
    state.gateway.get_event(id).await.map_err(|err| {
        if !err.is_not_found() {
            state.metrics.record_request_failure();
        }
        warn!(event_id = %id, error = %err, "failed to fetch event");
        AppError::from(err)
    })
}

pub async fn get_stats(state: &AppState) -> Result<Stats, AppError> {
    state.gateway.fetch_stats().await.map_err(|err| {
        state.metrics.record_request_failure();
        warn!(error = %err, "failed to fetch stats");
        AppError::from(err)
    })
}
