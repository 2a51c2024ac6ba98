use std::collections::VecDeque;
use std::mem;
use std::time::Duration;

use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use client_domain::ports::EventStream;
use client_domain::{ClientConfig, GatewayError, StreamMessage, StreamSignal};

use super::sse_decoder::{SseDecoder, SseFrame};
use crate::utils::{exponential_backoff, streaming_client};

const SUBSCRIBE_PATH: &str = "/api/events/subscribe";
const LAST_EVENT_ID: &str = "Last-Event-ID";

type Body = BoxStream<'static, Result<Vec<u8>, String>>;

/// Reconnecting subscription to the service's `text/event-stream`.
pub struct SseEventStream {
    client: Client,
    url: String,
    base_delay: Duration,
    max_delay: Duration,
}

impl SseEventStream {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: streaming_client(config)?,
            url: config.endpoint(SUBSCRIBE_PATH),
            base_delay: Duration::from_millis(config.reconnect_delay_ms),
            max_delay: Duration::from_millis(config.reconnect_max_delay_ms),
        })
    }
}

impl EventStream for SseEventStream {
    fn subscribe(&self) -> BoxStream<'static, StreamSignal> {
        let subscription = Subscription {
            client: self.client.clone(),
            url: self.url.clone(),
            base_delay: self.base_delay,
            max_delay: self.max_delay,
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            phase: Phase::Connect,
            attempt: 0,
        };
        stream::unfold(subscription, |mut subscription| async move {
            let signal = subscription.next_signal().await;
            Some((signal, subscription))
        })
        .boxed()
    }
}

enum Phase {
    Connect,
    Streaming(Body),
    Waiting(Duration),
}

struct Subscription {
    client: Client,
    url: String,
    base_delay: Duration,
    max_delay: Duration,
    decoder: SseDecoder,
    pending: VecDeque<StreamSignal>,
    phase: Phase,
    attempt: u32,
}

impl Subscription {
    async fn next_signal(&mut self) -> StreamSignal {
        loop {
            if let Some(signal) = self.pending.pop_front() {
                return signal;
            }
            match mem::replace(&mut self.phase, Phase::Connect) {
                Phase::Connect => match connect(self.request()).await {
                    Ok(body) => {
                        info!(url = %self.url, "subscription connected");
                        self.attempt = 0;
                        self.decoder.reset();
                        self.phase = Phase::Streaming(body);
                        return StreamSignal::Opened;
                    }
                    Err(reason) => return self.interrupted(reason),
                },
                Phase::Streaming(mut body) => match body.next().await {
                    Some(Ok(chunk)) => {
                        for frame in self.decoder.push(&chunk) {
                            if let Some(message) = decode_frame(frame) {
                                self.pending.push_back(StreamSignal::Message(message));
                            }
                        }
                        self.phase = Phase::Streaming(body);
                    }
                    Some(Err(reason)) => return self.interrupted(reason),
                    None => return self.interrupted("stream closed by service".to_string()),
                },
                Phase::Waiting(delay) => sleep(delay).await,
            }
        }
    }

    fn request(&self) -> RequestBuilder {
        let request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        match self.decoder.last_event_id() {
            Some(id) => request.header(LAST_EVENT_ID, id),
            None => request,
        }
    }

    fn interrupted(&mut self, reason: String) -> StreamSignal {
        let delay = self.reconnect_delay();
        warn!(
            attempt = self.attempt,
            delay_ms = delay.as_millis() as u64,
            reason = %reason,
            "subscription lost"
        );
        self.attempt = self.attempt.saturating_add(1);
        self.phase = Phase::Waiting(delay);
        StreamSignal::Interrupted(reason)
    }

    /// A `retry:` hint from the service replaces the configured base.
    fn reconnect_delay(&self) -> Duration {
        let base = self
            .decoder
            .retry_hint()
            .map(Duration::from_millis)
            .unwrap_or(self.base_delay);
        exponential_backoff(base, self.max_delay.max(base), self.attempt)
    }
}

// takes the built request so no borrow of the subscription lives across the await
async fn connect(request: RequestBuilder) -> Result<Body, String> {
    let response = request.send().await.map_err(|err| err.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("service responded {}", status));
    }
    Ok(response
        .bytes_stream()
        .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(|err| err.to_string()))
        .boxed())
}

fn decode_frame(frame: SseFrame) -> Option<StreamMessage> {
    match StreamMessage::decode(&frame.event, &frame.data) {
        Ok(Some(message)) => Some(message),
        Ok(None) => {
            debug!(event = %frame.event, "ignoring unknown stream event");
            None
        }
        Err(err) => {
            warn!(event = %frame.event, error = %err, "undecodable stream payload");
            None
        }
    }
}
