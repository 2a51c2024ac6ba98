mod common;

use std::time::Duration;

use futures_util::StreamExt;
use httpmock::prelude::*;
use tokio::time::timeout;

use client_domain::ports::EventStream;
use client_domain::{EventId, StreamMessage, StreamSignal};
use client_infrastructure::SseEventStream;

use common::config_for;

const BODY: &str = concat!(
    ": connected\n\n",
    "event:event-created\n",
    "data:{\"id\":7,\"title\":\"Order #42\",\"source\":\"web-app\",\"type\":\"USER_ACTION\",\"status\":\"PENDING\",\"createdAt\":\"2025-03-05T14:03:22\"}\n\n",
    "event:heartbeat\ndata:{}\n\n",
    "event:event-updated\n",
    "data:{\"id\":7,\"title\":\"Order #42\",\"source\":\"web-app\",\"type\":\"USER_ACTION\",\"status\":\"PROCESSED\",\"createdAt\":\"2025-03-05T14:03:22\",\"processedAt\":\"2025-03-05T14:03:24\"}\n\n",
    "event:events-cleared\ndata:null\n\n",
);

#[tokio::test]
async fn delivers_messages_then_reconnects_when_the_body_ends() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/events/subscribe")
                .header("accept", "text/event-stream");
            then.status(200)
                .header("content-type", "text/event-stream")
                .body(BODY);
        })
        .await;

    let stream = SseEventStream::new(&config_for(&server)).expect("stream");
    let signals: Vec<StreamSignal> = timeout(
        Duration::from_secs(10),
        stream.subscribe().take(6).collect(),
    )
    .await
    .expect("signals in time");

    assert_eq!(signals[0], StreamSignal::Opened);
    match &signals[1] {
        StreamSignal::Message(StreamMessage::EventCreated(event)) => {
            assert_eq!(event.id, EventId(7))
        }
        other => panic!("expected event-created, got {:?}", other),
    }
    assert!(matches!(
        &signals[2],
        StreamSignal::Message(StreamMessage::EventUpdated(event)) if event.processed_at.is_some()
    ));
    assert_eq!(signals[3], StreamSignal::Message(StreamMessage::EventsCleared));
    assert!(matches!(signals[4], StreamSignal::Interrupted(_)));
    assert_eq!(signals[5], StreamSignal::Opened);
    assert!(mock.hits_async().await >= 2);
}

#[tokio::test]
async fn service_errors_interrupt_and_retry() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/events/subscribe");
            then.status(503);
        })
        .await;

    let stream = SseEventStream::new(&config_for(&server)).expect("stream");
    let signals: Vec<StreamSignal> = timeout(
        Duration::from_secs(10),
        stream.subscribe().take(2).collect(),
    )
    .await
    .expect("signals in time");

    for signal in &signals {
        match signal {
            StreamSignal::Interrupted(reason) => assert!(reason.contains("503")),
            other => panic!("expected interruption, got {:?}", other),
        }
    }
    assert_eq!(mock.hits_async().await, 2);
}
