//! # Lifecycle events emitted for string-producing operations.
//!
//! The [`EventKind`] enum is the tagged representation of the four
//! notifications a producer reports for one subscription:
//! - **Subscribed**: the operation was announced; carries the consumer handle
//! - **Next**: one emitted text value
//! - **Error**: terminal failure with an optional message
//! - **Completed**: terminal, normal exhaustion of the stream
//!
//! The [`Event`] struct wraps a kind with delivery metadata: the owning
//! subscription id, a wall-clock timestamp, and a sequence number.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::stream::{Subscription, SubscriptionId};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Tagged lifecycle notification for one subscription.
///
/// The variants mirror the [`StringSubscriber`](crate::StringSubscriber)
/// methods one-to-one; the fan-out worker decodes a variant into the
/// corresponding callback.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Operation announced. Carries the opaque consumer handle; delivered
    /// exactly once, strictly before any other event of the subscription.
    Subscribed {
        /// Handle representing the in-flight operation.
        subscription: Subscription,
    },

    /// One emitted text value.
    Next {
        /// The payload.
        value: Arc<str>,
    },

    /// Terminal failure. The descriptive message is optional.
    Error {
        /// Failure description, if the producer supplied one.
        reason: Option<Arc<str>>,
    },

    /// Terminal, normal exhaustion of the stream. No payload.
    Completed,
}

impl EventKind {
    /// True for [`EventKind::Error`] and [`EventKind::Completed`].
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Error { .. } | EventKind::Completed)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::Subscribed { .. } => "subscribed",
            EventKind::Next { .. } => "next",
            EventKind::Error { .. } => "error",
            EventKind::Completed => "completed",
        }
    }
}

/// Lifecycle event with delivery metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `subscription`: id of the operation the event belongs to
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Id of the subscription this event belongs to.
    pub subscription: SubscriptionId,
    /// The notification itself.
    pub kind: EventKind,
}

impl Event {
    fn new(subscription: SubscriptionId, kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            subscription,
            kind,
        }
    }

    /// Creates the announcement event carrying the consumer handle.
    #[inline]
    pub fn subscribed(handle: Subscription) -> Self {
        let id = handle.id();
        Self::new(id, EventKind::Subscribed { subscription: handle })
    }

    /// Creates a value event.
    #[inline]
    pub fn next(subscription: SubscriptionId, value: impl Into<Arc<str>>) -> Self {
        Self::new(
            subscription,
            EventKind::Next {
                value: value.into(),
            },
        )
    }

    /// Creates the error terminal event. `reason` may be absent.
    #[inline]
    pub fn error(subscription: SubscriptionId, reason: Option<&str>) -> Self {
        Self::new(
            subscription,
            EventKind::Error {
                reason: reason.map(Arc::from),
            },
        )
    }

    /// Creates the completion terminal event.
    #[inline]
    pub fn completed(subscription: SubscriptionId) -> Self {
        Self::new(subscription, EventKind::Completed)
    }

    /// True if this event ends the sequence for its subscription.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let id = SubscriptionId::next();
        let first = Event::next(id, "a");
        let second = Event::completed(id);
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_terminal_classification() {
        let id = SubscriptionId::next();
        assert!(!Event::next(id, "a").is_terminal());
        assert!(Event::error(id, Some("boom")).is_terminal());
        assert!(Event::error(id, None).is_terminal());
        assert!(Event::completed(id).is_terminal());
    }

    #[test]
    fn test_labels() {
        let id = SubscriptionId::next();
        assert_eq!(Event::next(id, "a").kind.as_label(), "next");
        assert_eq!(Event::error(id, None).kind.as_label(), "error");
        assert_eq!(Event::completed(id).kind.as_label(), "completed");
    }

    #[test]
    fn test_error_reason_is_optional() {
        let id = SubscriptionId::next();
        match Event::error(id, None).kind {
            EventKind::Error { reason } => assert!(reason.is_none()),
            other => panic!("unexpected kind: {}", other.as_label()),
        }
        match Event::error(id, Some("timeout")).kind {
            EventKind::Error { reason } => assert_eq!(reason.as_deref(), Some("timeout")),
            other => panic!("unexpected kind: {}", other.as_label()),
        }
    }
}
