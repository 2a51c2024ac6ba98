// Event stream client
// One task owns the view; requests, the confirmation prompt and the update
// source run as children and report back over channels

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use client_domain::{
    ConnectionEvent, ConnectionState, Event, EventDraft, GatewayError, Notification, Stats,
    StreamMessage, StreamSignal,
};

use crate::commands::{clear_events_commands, create_event_commands};
use crate::notifications::NotificationSlot;
use crate::queries::snapshot_queries::{load_events, load_stats, Snapshot};
use crate::sources::{source_for, SourceUpdate, UpdateSource};
use crate::view::{FormField, Reconciled, ViewState};
use crate::{AppError, AppState};

const COMMAND_BUFFER: usize = 32;
const UPDATE_BUFFER: usize = 64;

pub const CONNECTION_LOST: &str = "Connection lost. Reconnecting...";
pub const REMOTE_CLEAR: &str = "All events were cleared";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(FormField),
    /// Submit the form.
    Submit,
    /// Submit a draft that did not come from the form.
    Create(EventDraft),
    ClearAll,
    Refresh,
}

enum Completion {
    Events {
        result: Result<Vec<Event>, GatewayError>,
        tracked: bool,
    },
    Stats {
        result: Result<Stats, GatewayError>,
        tracked: bool,
    },
    Created {
        result: Result<Event, AppError>,
        from_form: bool,
    },
    ClearConfirmed(bool),
    Cleared(Result<(), AppError>),
}

/// Cloneable front door to a running client.
#[derive(Clone)]
pub struct ClientHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<ViewState>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl ClientHandle {
    pub async fn send(&self, command: Command) -> Result<(), AppError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::Closed)
    }

    pub async fn edit(&self, field: FormField) -> Result<(), AppError> {
        self.send(Command::Edit(field)).await
    }

    pub async fn submit(&self) -> Result<(), AppError> {
        self.send(Command::Submit).await
    }

    pub async fn create(&self, draft: EventDraft) -> Result<(), AppError> {
        self.send(Command::Create(draft)).await
    }

    pub async fn clear_all(&self) -> Result<(), AppError> {
        self.send(Command::ClearAll).await
    }

    pub async fn refresh(&self) -> Result<(), AppError> {
        self.send(Command::Refresh).await
    }

    /// A receiver that wakes on every published change.
    pub fn view(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    pub fn snapshot(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Starts teardown. Idempotent; await the task's `JoinHandle` to know
    /// it has finished.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

pub struct EventStreamClient {
    state: AppState,
    source: Arc<dyn UpdateSource>,
    view: ViewState,
    notifications: NotificationSlot,
    pending_loads: usize,
    confirming: bool,
    clearing: bool,
    tasks: JoinSet<Completion>,
    view_tx: watch::Sender<ViewState>,
}

impl EventStreamClient {
    pub fn spawn(state: AppState) -> (ClientHandle, JoinHandle<()>) {
        let source = source_for(&state);
        Self::spawn_with_source(state, source)
    }

    pub fn spawn_with_source(
        state: AppState,
        source: Arc<dyn UpdateSource>,
    ) -> (ClientHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let view = ViewState::new(&state.config, source.mode());
        let (view_tx, view_rx) = watch::channel(view.clone());

        let client = EventStreamClient {
            notifications: NotificationSlot::new(state.config.notification_ttl()),
            state,
            source,
            view,
            pending_loads: 0,
            confirming: false,
            clearing: false,
            tasks: JoinSet::new(),
            view_tx,
        };
        let task = tokio::spawn(client.run(command_rx, shutdown_rx));

        let handle = ClientHandle {
            commands: command_tx,
            view: view_rx,
            shutdown: Arc::new(shutdown_tx),
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let (update_tx, mut updates) = mpsc::channel(UPDATE_BUFFER);
        let source = self.source.clone();
        let source_task = tokio::spawn(async move { source.run(update_tx).await });

        info!(mode = %self.view.mode, api = %self.state.config.api_base_url, "client started");
        self.refresh(true);
        self.publish();

        loop {
            let expiry = self.notifications.expires_at();
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                command = commands.recv() => match command {
                    Some(command) => self.on_command(command),
                    None => break,
                },
                Some(update) = updates.recv() => self.on_update(update),
                Some(joined) = self.tasks.join_next() => match joined {
                    Ok(completion) => self.on_completion(completion),
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => warn!(error = %err, "client task failed"),
                },
                _ = sleep_until(expiry.unwrap_or_else(Instant::now)), if expiry.is_some() => {
                    self.notifications.expire(Instant::now());
                }
            }
            self.publish();
        }

        source_task.abort();
        drop(updates);
        self.teardown();
    }

    fn teardown(&mut self) {
        self.tasks.abort_all();
        if let Some(connection) = self.view.connection {
            self.view.connection = Some(connection.transition(ConnectionEvent::Teardown));
        }
        self.publish();
        info!(metrics = %self.state.metrics.summary(), "client stopped");
    }

    fn publish(&mut self) {
        self.view.loading = self.pending_loads > 0 || self.clearing;
        self.view.notification = self.notifications.current().cloned();
        let next = &self.view;
        self.view_tx.send_if_modified(|current| {
            if *current == *next {
                return false;
            }
            *current = next.clone();
            true
        });
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.show(notification, Instant::now());
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Edit(field) => self.view.form.edit(field),
            Command::Submit => {
                let draft = self.view.form.to_draft();
                self.start_create(draft, true);
            }
            Command::Create(draft) => self.start_create(draft, false),
            Command::ClearAll => self.start_clear(),
            Command::Refresh => self.refresh(true),
        }
    }

    fn start_create(&mut self, draft: EventDraft, from_form: bool) {
        if !self.view.can_submit() {
            debug!("create ignored: a submission is in flight");
            return;
        }
        let draft = match create_event_commands::prepare_draft(draft) {
            Ok(draft) => draft,
            Err(err) => {
                self.notify(Notification::error(create_event_commands::failure_message(&err)));
                return;
            }
        };
        self.view.submitting = true;
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = create_event_commands::submit_draft(&state, draft).await;
            Completion::Created { result, from_form }
        });
    }

    fn start_clear(&mut self) {
        if self.confirming || self.clearing || !self.view.can_clear() {
            debug!("clear-all ignored");
            return;
        }
        self.confirming = true;
        let state = self.state.clone();
        self.tasks.spawn(async move {
            Completion::ClearConfirmed(clear_events_commands::confirm_clear(&state).await)
        });
    }

    /// Re-fetches events and stats as two independent requests. Tracked
    /// loads hold the loading flag until both settle.
    fn refresh(&mut self, tracked: bool) {
        if tracked {
            self.pending_loads += 2;
        }
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = load_events(&state).await;
            Completion::Events { result, tracked }
        });
        self.spawn_stats(tracked);
    }

    fn spawn_stats(&mut self, tracked: bool) {
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = load_stats(&state).await;
            Completion::Stats { result, tracked }
        });
    }

    fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Events { result, tracked } => {
                self.settle_load(tracked);
                self.apply_events(result);
            }
            Completion::Stats { result, tracked } => {
                self.settle_load(tracked);
                self.apply_stats(result);
            }
            Completion::Created { result, from_form } => {
                self.view.submitting = false;
                match result {
                    Ok(event) => {
                        self.notify(Notification::success(create_event_commands::created_message(
                            &event,
                        )));
                        if from_form {
                            self.view.form.reset_after_submit();
                        }
                        self.view.events.upsert_created(event);
                        self.refresh(false);
                    }
                    Err(err) => {
                        self.notify(Notification::error(create_event_commands::failure_message(
                            &err,
                        )));
                    }
                }
            }
            Completion::ClearConfirmed(confirmed) => {
                self.confirming = false;
                if !confirmed {
                    info!("clear-all cancelled");
                    return;
                }
                self.clearing = true;
                let state = self.state.clone();
                self.tasks.spawn(async move {
                    Completion::Cleared(clear_events_commands::clear_events(&state).await)
                });
            }
            Completion::Cleared(result) => {
                self.clearing = false;
                match result {
                    Ok(()) => {
                        self.view.events.clear();
                        self.notify(Notification::success(clear_events_commands::CLEARED_MESSAGE));
                        self.refresh(false);
                    }
                    Err(err) => {
                        self.notify(Notification::error(clear_events_commands::failure_message(
                            &err,
                        )));
                    }
                }
            }
        }
    }

    fn settle_load(&mut self, tracked: bool) {
        if tracked {
            self.pending_loads = self.pending_loads.saturating_sub(1);
        }
    }

    // a failed half keeps whatever was shown before
    fn apply_events(&mut self, result: Result<Vec<Event>, GatewayError>) {
        if let Ok(events) = result {
            self.view.events.replace_all(events);
            self.state.metrics.record_snapshot();
        }
    }

    fn apply_stats(&mut self, result: Result<Stats, GatewayError>) {
        if let Ok(stats) = result {
            self.view.stats = Some(stats);
        }
    }

    fn on_update(&mut self, update: SourceUpdate) {
        match update {
            SourceUpdate::Snapshot(Snapshot { events, stats }) => {
                self.apply_events(events);
                self.apply_stats(stats);
            }
            SourceUpdate::Signal(signal) => self.on_signal(signal),
        }
    }

    fn transition(&mut self, event: ConnectionEvent) -> Option<ConnectionState> {
        let previous = self.view.connection?;
        self.view.connection = Some(previous.transition(event));
        Some(previous)
    }

    fn on_signal(&mut self, signal: StreamSignal) {
        match signal {
            StreamSignal::Opened => {
                let previous = self.transition(ConnectionEvent::Opened);
                info!("subscription open");
                if previous == Some(ConnectionState::Reconnecting) {
                    self.notifications.dismiss_sticky();
                    // anything missed while disconnected is only in a snapshot
                    self.refresh(false);
                }
            }
            StreamSignal::Interrupted(reason) => {
                let previous = self.transition(ConnectionEvent::TransportError);
                warn!(reason = %reason, "subscription interrupted");
                if previous != Some(ConnectionState::Reconnecting) {
                    self.notify(Notification::error(CONNECTION_LOST).sticky());
                }
            }
            StreamSignal::Message(message) => self.on_message(message),
        }
    }

    fn on_message(&mut self, message: StreamMessage) {
        self.state.metrics.record_stream_message();
        let outcome = self.view.events.apply(&message);
        match (&message, outcome) {
            (StreamMessage::EventUpdated(event), Reconciled::Dropped) => {
                self.state.metrics.record_dropped_update();
                debug!(event_id = %event.id, "update for unknown event dropped");
            }
            (StreamMessage::EventCreated(event), _) => {
                let text = format!("New event #{}: {}", event.id, event.title);
                self.notify(Notification::success(text));
            }
            (StreamMessage::EventsCleared, _) => {
                self.notify(Notification::info(REMOTE_CLEAR));
            }
            _ => {}
        }
        self.spawn_stats(false);
    }
}
