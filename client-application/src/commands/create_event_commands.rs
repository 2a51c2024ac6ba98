use tracing::{info, warn};

use client_domain::{Event, EventDraft, GatewayError};

use crate::{AppError, AppState};

pub const CREATE_FAILED: &str = "Failed to create event";
pub const CONNECTION_ERROR_HINT: &str = "Connection error. Is the API running?";

/// Local short-circuit: an invalid draft never reaches the network.
pub fn prepare_draft(draft: EventDraft) -> Result<EventDraft, AppError> {
    draft.validate()?;
    Ok(draft)
}

pub async fn create_event(state: &AppState, draft: EventDraft) -> Result<Event, AppError> {
    let draft = prepare_draft(draft)?;
    submit_draft(state, draft).await
}

/// Sends an already validated draft.
pub async fn submit_draft(state: &AppState, draft: EventDraft) -> Result<Event, AppError> {
    match state.gateway.create_event(&draft).await {
        Ok(event) => {
            info!(
                event_id = %event.id,
                status = %event.status,
                event_type = %event.event_type,
                "event created"
            );
            Ok(event)
        }
        Err(err) => {
            state.metrics.record_request_failure();
            warn!(title = %draft.title, error = %err, "failed to create event");
            Err(err.into())
        }
    }
}

pub fn created_message(event: &Event) -> String {
    format!("Event #{} created successfully!", event.id)
}

pub fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(err) => err.to_string(),
        AppError::Gateway(GatewayError::Network(_)) => CONNECTION_ERROR_HINT.to_string(),
        AppError::Gateway(err) => err
            .service_message()
            .unwrap_or_else(|| CREATE_FAILED.to_string()),
        AppError::Closed => CREATE_FAILED.to_string(),
    }
}
