// Stream message entity
// Named messages pushed by the service's subscription endpoint

use crate::entities::Event;

pub const EVENT_CREATED: &str = "event-created";
pub const EVENT_UPDATED: &str = "event-updated";
pub const EVENTS_CLEARED: &str = "events-cleared";

#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    EventCreated(Event),
    EventUpdated(Event),
    EventsCleared,
}

impl StreamMessage {
    pub fn name(&self) -> &'static str {
        match self {
            StreamMessage::EventCreated(_) => EVENT_CREATED,
            StreamMessage::EventUpdated(_) => EVENT_UPDATED,
            StreamMessage::EventsCleared => EVENTS_CLEARED,
        }
    }

    /// Returns `Ok(None)` for message names this client does not handle.
    pub fn decode(name: &str, data: &str) -> Result<Option<Self>, serde_json::Error> {
        match name.trim() {
            EVENT_CREATED => Ok(Some(StreamMessage::EventCreated(serde_json::from_str(data)?))),
            EVENT_UPDATED => Ok(Some(StreamMessage::EventUpdated(serde_json::from_str(data)?))),
            // carries no payload; whatever the service put in `data` is ignored
            EVENTS_CLEARED => Ok(Some(StreamMessage::EventsCleared)),
            _ => Ok(None),
        }
    }
}

/// What a live subscription reports to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamSignal {
    Opened,
    Message(StreamMessage),
    Interrupted(String),
}
