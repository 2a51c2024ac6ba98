use tracing::{info, warn};

use crate::{AppError, AppState};

pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to delete ALL events?";
pub const CLEARED_MESSAGE: &str = "All events cleared successfully!";
pub const CLEAR_FAILED: &str = "Failed to clear events";
pub const CLEAR_CONNECTION_ERROR: &str = "Connection error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Cancelled,
}

pub async fn confirm_clear(state: &AppState) -> bool {
    state.confirm.confirm(CLEAR_CONFIRMATION).await
}

/// Sends the delete-all request. Callers must have confirmed first.
pub async fn clear_events(state: &AppState) -> Result<(), AppError> {
    match state.gateway.clear_events().await {
        Ok(()) => {
            info!("all events cleared");
            Ok(())
        }
        Err(err) => {
            state.metrics.record_request_failure();
            warn!(error = %err, "failed to clear events");
            Err(err.into())
        }
    }
}

pub async fn clear_all(state: &AppState) -> Result<ClearOutcome, AppError> {
    if !confirm_clear(state).await {
        info!("clear-all cancelled");
        return Ok(ClearOutcome::Cancelled);
    }
    clear_events(state).await?;
    Ok(ClearOutcome::Cleared)
}

pub fn failure_message(err: &AppError) -> String {
    if err.is_network() {
        CLEAR_CONNECTION_ERROR.to_string()
    } else {
        CLEAR_FAILED.to_string()
    }
}
