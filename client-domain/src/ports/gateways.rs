use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::entities::{Event, EventDraft, Stats, StreamSignal};
use crate::errors::GatewayError;
use crate::value_objects::{EventId, EventStatus};

/// Request/response side of the event service.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Newest first.
    async fn list_events(&self) -> Result<Vec<Event>, GatewayError>;
    async fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<Event>, GatewayError>;
    async fn get_event(&self, id: EventId) -> Result<Event, GatewayError>;
    async fn fetch_stats(&self) -> Result<Stats, GatewayError>;
    async fn create_event(&self, draft: &EventDraft) -> Result<Event, GatewayError>;
    async fn clear_events(&self) -> Result<(), GatewayError>;
}

/// Push side of the event service.
///
/// The returned stream reconnects on its own after transport errors and
/// reports each interruption as [`StreamSignal::Interrupted`]. It only ends
/// when dropped, which also closes the underlying connection.
pub trait EventStream: Send + Sync {
    fn subscribe(&self) -> BoxStream<'static, StreamSignal>;
}
