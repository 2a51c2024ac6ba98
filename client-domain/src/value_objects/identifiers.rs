// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Service-assigned event identifier. Immutable once the event exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId(value)
    }
}
