// Event type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[default]
    UserAction,
    SystemEvent,
    Notification,
    DataUpdate,
    Integration,
    /// Any type the service stores that this client does not know about.
    #[serde(other)]
    Unknown,
}

impl EventType {
    pub const SELECTABLE: [EventType; 5] = [
        EventType::UserAction,
        EventType::SystemEvent,
        EventType::Notification,
        EventType::DataUpdate,
        EventType::Integration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::UserAction => "USER_ACTION",
            EventType::SystemEvent => "SYSTEM_EVENT",
            EventType::Notification => "NOTIFICATION",
            EventType::DataUpdate => "DATA_UPDATE",
            EventType::Integration => "INTEGRATION",
            EventType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        EventType::SELECTABLE
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown event type '{}'", s.trim()))
    }
}
