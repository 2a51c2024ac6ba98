use client_domain::{ClientConfig, ConnectionState, Notification, Stats, UpdateMode};

use super::{EventForm, EventList};

/// Everything a renderer needs, published after every loop turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: UpdateMode,
    pub events: EventList,
    pub stats: Option<Stats>,
    pub form: EventForm,
    pub loading: bool,
    pub submitting: bool,
    /// `None` in poll mode.
    pub connection: Option<ConnectionState>,
    pub notification: Option<Notification>,
}

impl ViewState {
    pub fn new(config: &ClientConfig, mode: UpdateMode) -> Self {
        Self {
            mode,
            events: EventList::default(),
            stats: None,
            form: EventForm::new(config),
            loading: false,
            submitting: false,
            connection: match mode {
                UpdateMode::Push => Some(ConnectionState::Connecting),
                UpdateMode::Poll => None,
            },
            notification: None,
        }
    }

    pub fn can_clear(&self) -> bool {
        !self.loading && !self.events.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
    }
}
