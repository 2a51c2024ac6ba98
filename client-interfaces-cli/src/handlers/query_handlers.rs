use client_application::queries::event_queries;
use client_application::AppState;
use client_domain::{EventId, EventStatus};

use crate::error::CliError;
use crate::render::{render_event, render_events, render_stats};

pub async fn list_events(
    state: &AppState,
    status: Option<EventStatus>,
    json: bool,
) -> Result<String, CliError> {
    let events = event_queries::list_events(state, status).await?;
    if json {
        return to_json(&events);
    }
    Ok(render_events(&events))
}

pub async fn get_event(state: &AppState, id: i64, json: bool) -> Result<String, CliError> {
    let event = event_queries::get_event(state, EventId(id)).await?;
    if json {
        return to_json(&event);
    }
    Ok(render_event(&event))
}

pub async fn get_stats(state: &AppState, json: bool) -> Result<String, CliError> {
    let stats = event_queries::get_stats(state).await?;
    if json {
        return to_json(&stats);
    }
    Ok(render_stats(Some(&stats)))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Rejected(err.to_string()))
}
