use std::sync::Arc;

use client_application::commands::clear_events_commands::{self, ClearOutcome};
use client_application::commands::create_event_commands;
use client_application::AppState;
use client_domain::{EventDraft, EventType};

use crate::error::CliError;
use crate::prompt::AutoConfirm;
use crate::render::render_event;

#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub source: Option<String>,
    pub event_type: Option<EventType>,
}

pub async fn create_event(state: &AppState, args: CreateArgs) -> Result<String, CliError> {
    let source = args
        .source
        .unwrap_or_else(|| state.config.default_source.clone());
    let event_type = args.event_type.unwrap_or(state.config.default_type);
    let draft = EventDraft::new(args.title, source, event_type).with_description(args.description);

    let event = create_event_commands::create_event(state, draft).await?;
    Ok(format!(
        "{}\n{}",
        create_event_commands::created_message(&event),
        render_event(&event)
    ))
}

pub async fn clear_events(state: &AppState, assume_yes: bool) -> Result<String, CliError> {
    let state = if assume_yes {
        AppState {
            confirm: Arc::new(AutoConfirm),
            ..state.clone()
        }
    } else {
        state.clone()
    };
    let message = match clear_events_commands::clear_all(&state).await? {
        ClearOutcome::Cleared => clear_events_commands::CLEARED_MESSAGE,
        ClearOutcome::Cancelled => "Cancelled, nothing was deleted.",
    };
    Ok(message.to_string())
}
