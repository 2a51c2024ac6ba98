pub mod clear_events_commands;
pub mod create_event_commands;
