//! Best-effort notification dispatch.
//!
//! [`NotificationDispatcher`] hands records to a [`NotificationSink`] and
//! never reports failure to its caller. Each submission is bounded by a
//! per-call timeout; a timeout aborts that submission only. Outcomes are
//! logged and counted in [`DispatchStats`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use eventhub_core::notification::NotificationType;
use eventhub_core::types::DbId;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::delivery::sink::{NewNotification, NotificationSink};

/// Default upper bound for a single sink submission.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of concurrent submissions during a fan-out.
pub const DEFAULT_FANOUT_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// DispatchStats
// ---------------------------------------------------------------------------

/// Process-wide delivery outcome counters.
#[derive(Debug, Default)]
pub struct DispatchStats {
    delivered: AtomicU64,
    failed: AtomicU64,
    timed_out: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSnapshot {
    pub delivered: u64,
    pub failed: u64,
    pub timed_out: u64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Fire-and-forget delivery of notification records.
///
/// Cheap to clone; clones share the sink and the counters.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
    timeout: Duration,
    concurrency: usize,
    stats: Arc<DispatchStats>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            timeout: DEFAULT_DISPATCH_TIMEOUT,
            concurrency: DEFAULT_FANOUT_CONCURRENCY,
            stats: Arc::new(DispatchStats::default()),
        }
    }

    /// Override the per-submission timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the fan-out worker bound (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn stats(&self) -> DispatchSnapshot {
        self.stats.snapshot()
    }

    /// Send one notification. Never fails.
    pub async fn send(
        &self,
        recipient_id: DbId,
        event_id: Option<DbId>,
        kind: NotificationType,
        message: impl Into<String>,
    ) {
        self.deliver(NewNotification::new(recipient_id, event_id, kind, message))
            .await;
    }

    /// Submit a prepared record, bounded by the configured timeout.
    pub async fn deliver(&self, notification: NewNotification) {
        let outcome = tokio::time::timeout(self.timeout, self.sink.submit(&notification)).await;
        match outcome {
            Ok(Ok(())) => {
                self.stats.delivered.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    recipient_id = notification.participant_id,
                    event_id = ?notification.event_id,
                    notification_type = %notification.kind,
                    "Notification delivered"
                );
            }
            Ok(Err(e)) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    recipient_id = notification.participant_id,
                    event_id = ?notification.event_id,
                    notification_type = %notification.kind,
                    error = %e,
                    "Notification delivery failed"
                );
            }
            Err(_) => {
                self.stats.timed_out.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    recipient_id = notification.participant_id,
                    event_id = ?notification.event_id,
                    notification_type = %notification.kind,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Notification delivery timed out"
                );
            }
        }
    }

    /// Deliver every record with at most `concurrency` submissions in
    /// flight, returning once all of them have completed or timed out.
    pub async fn fan_out(&self, notifications: Vec<NewNotification>) {
        let total = notifications.len();
        stream::iter(notifications)
            .for_each_concurrent(self.concurrency, |notification| self.deliver(notification))
            .await;
        tracing::debug!(total, "Fan-out complete");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
