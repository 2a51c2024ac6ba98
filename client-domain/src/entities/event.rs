// Event entity
// Mirrors the service's event record; the client never mutates one on its own

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::timestamps;
use crate::value_objects::{EventId, EventStatus, EventType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub status: EventStatus,
    #[serde(default, with = "timestamps")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamps")]
    pub processed_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let event: Event = serde_json::from_str(
            r#"{"id":7,"title":"Order #42","description":null,"source":"web-app","type":"USER_ACTION","status":"PENDING","createdAt":"2025-03-05T14:03:22.123456","processedAt":null,"retryCount":0}"#,
        )
        .expect("event");
        assert_eq!(event.id, EventId(7));
        assert_eq!(event.event_type, EventType::UserAction);
        assert_eq!(event.status, EventStatus::Pending);
        assert!(event.created_at.is_some());
        assert!(event.processed_at.is_none());
        assert_eq!(event.retry_count, Some(0));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let event: Event = serde_json::from_str(
            r#"{"id":3,"title":"sync","source":"cron","type":"DATA_UPDATE","status":"PROCESSED","processedAt":"2025-03-05T14:03:25Z"}"#,
        )
        .expect("event");
        assert_eq!(event.description, None);
        assert_eq!(event.created_at, None);
        assert!(event.processed_at.is_some());
    }
}
