// In-memory stand-ins for the service, the subscription and the user

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc;

use client_domain::ports::{ConfirmPrompt, EventGateway, EventStream};
use client_domain::{
    ClientConfig, Event, EventDraft, EventId, EventStatus, EventType, GatewayError, Stats,
    StreamSignal,
};

use crate::{AppState, ClientMetrics};

pub fn event(id: i64, status: EventStatus) -> Event {
    Event {
        id: EventId(id),
        title: format!("event {}", id),
        description: None,
        source: "test".to_string(),
        event_type: EventType::SystemEvent,
        status,
        created_at: None,
        processed_at: None,
        retry_count: Some(0),
    }
}

#[derive(Default)]
struct Counters {
    list: AtomicUsize,
    create: AtomicUsize,
    clear: AtomicUsize,
}

pub struct FakeGateway {
    stored: Mutex<Vec<Event>>,
    next_id: Mutex<i64>,
    failing_stats: bool,
    failing_clear: bool,
    offline: bool,
    list_delay: Option<Duration>,
    calls: Counters,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            stored: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            failing_stats: false,
            failing_clear: false,
            offline: false,
            list_delay: None,
            calls: Counters::default(),
        }
    }
}

impl FakeGateway {
    /// Ids `count..=1`, newest first, alternating PENDING / PROCESSED.
    pub fn with_events(self, count: i64) -> Self {
        let events = (1..=count)
            .rev()
            .map(|id| {
                let status = if id % 2 == 0 {
                    EventStatus::Pending
                } else {
                    EventStatus::Processed
                };
                event(id, status)
            })
            .collect();
        *self.stored.lock().unwrap() = events;
        *self.next_id.lock().unwrap() = count + 1;
        self
    }

    pub fn next_id(self, id: i64) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    pub fn failing_stats(mut self) -> Self {
        self.failing_stats = true;
        self
    }

    pub fn failing_clear(mut self) -> Self {
        self.failing_clear = true;
        self
    }

    /// Every list call takes `delay` to answer.
    pub fn slow_list(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn store(&self, events: Vec<Event>) {
        *self.stored.lock().unwrap() = events;
    }

    pub fn stored(&self) -> Vec<Event> {
        self.stored.lock().unwrap().clone()
    }

    pub fn stored_len(&self) -> usize {
        self.stored.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.calls.clear.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), GatewayError> {
        if self.offline {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn current_stats(&self) -> Stats {
        let stored = self.stored.lock().unwrap();
        let count = |status: EventStatus| stored.iter().filter(|e| e.status == status).count() as u64;
        Stats {
            total: stored.len() as u64,
            pending: count(EventStatus::Pending),
            processing: count(EventStatus::Processing),
            processed: count(EventStatus::Processed),
            failed: count(EventStatus::Failed),
            kafka_enabled: false,
        }
    }
}

#[async_trait]
impl EventGateway for FakeGateway {
    async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;
        Ok(self.stored())
    }

    async fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<Event>, GatewayError> {
        self.check_online()?;
        Ok(self
            .stored()
            .into_iter()
            .filter(|event| event.status == status)
            .collect())
    }

    async fn get_event(&self, id: EventId) -> Result<Event, GatewayError> {
        self.check_online()?;
        self.stored()
            .into_iter()
            .find(|event| event.id == id)
            .ok_or_else(|| GatewayError::service(404, Some(format!("Event not found with id: {}", id))))
    }

    async fn fetch_stats(&self) -> Result<Stats, GatewayError> {
        self.check_online()?;
        if self.failing_stats {
            return Err(GatewayError::service(500, Some("An unexpected error occurred".into())));
        }
        Ok(self.current_stats())
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, GatewayError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let created = Event {
            id: EventId(id),
            title: draft.title.clone(),
            description: Some(draft.description.clone()),
            source: draft.source.clone(),
            event_type: draft.event_type,
            status: EventStatus::Pending,
            created_at: None,
            processed_at: None,
            retry_count: Some(0),
        };
        self.stored.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn clear_events(&self) -> Result<(), GatewayError> {
        self.calls.clear.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if self.failing_clear {
            return Err(GatewayError::service(500, Some("An unexpected error occurred".into())));
        }
        self.stored.lock().unwrap().clear();
        Ok(())
    }
}

/// Subscription fed by the test through an unbounded sender.
pub struct ScriptedStream {
    receiver: Mutex<Option<mpsc::UnboundedReceiver<StreamSignal>>>,
}

impl ScriptedStream {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedSender<StreamSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = Arc::new(Self {
            receiver: Mutex::new(Some(rx)),
        });
        (stream, tx)
    }
}

impl EventStream for ScriptedStream {
    fn subscribe(&self) -> BoxStream<'static, StreamSignal> {
        match self.receiver.lock().unwrap().take() {
            Some(rx) => stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|signal| (signal, rx))
            })
            .boxed(),
            None => stream::pending().boxed(),
        }
    }
}

pub struct FixedConfirm {
    answer: bool,
    asked: AtomicUsize,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmPrompt for FixedConfirm {
    async fn confirm(&self, _question: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub fn app_state(
    config: ClientConfig,
    gateway: Arc<FakeGateway>,
    stream: Arc<ScriptedStream>,
    confirm: Arc<FixedConfirm>,
) -> AppState {
    AppState {
        config,
        gateway,
        event_stream: stream,
        confirm,
        metrics: Arc::new(ClientMetrics::default()),
    }
}

pub fn state_with(gateway: Arc<FakeGateway>) -> AppState {
    state_with_confirm(gateway, Arc::new(FixedConfirm::new(true)))
}

pub fn state_with_confirm(gateway: Arc<FakeGateway>, confirm: Arc<FixedConfirm>) -> AppState {
    let (stream, _tx) = ScriptedStream::new();
    app_state(ClientConfig::default(), gateway, stream, confirm)
}
