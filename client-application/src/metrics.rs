use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ClientMetrics {
    snapshots_applied: AtomicU64,
    stream_messages: AtomicU64,
    dropped_updates: AtomicU64,
    request_failures: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub snapshots_applied: u64,
    pub stream_messages: u64,
    pub dropped_updates: u64,
    pub request_failures: u64,
}

impl ClientMetrics {
    pub fn record_snapshot(&self) {
        self.snapshots_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stream_message(&self) {
        self.stream_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_update(&self) {
        self.dropped_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_failure(&self) {
        self.request_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            snapshots_applied: self.snapshots_applied.load(Ordering::Relaxed),
            stream_messages: self.stream_messages.load(Ordering::Relaxed),
            dropped_updates: self.dropped_updates.load(Ordering::Relaxed),
            request_failures: self.request_failures.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "snapshots={} stream_messages={} dropped_updates={} request_failures={}",
            self.snapshots_applied, self.stream_messages, self.dropped_updates, self.request_failures
        )
    }
}
