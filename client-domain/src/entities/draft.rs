// Event draft entity
// Body of a creation request; validated locally before any network call

use serde::{Deserialize, Serialize};

use crate::errors::DraftError;
use crate::value_objects::EventType;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const SOURCE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, source: impl Into<String>, event_type: EventType) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            source: source.into(),
            event_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Presence checks only; the service owns every other rule.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.source.trim().is_empty() {
            return Err(DraftError::EmptySource);
        }
        Ok(())
    }
}

/// Caps `value` at `max` characters, the way a length-limited input field does.
pub fn clamp_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
