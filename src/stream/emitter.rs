//! # Producer-side handle for one operation.
//!
//! [`Emitter`] is the only way to publish lifecycle events for a
//! subscription, and its shape makes the call-sequence contract impossible to
//! break through the public API:
//!
//! - an emitter is obtained exclusively from [`Relay::open`](crate::Relay::open),
//!   which has already published `Subscribed` — so nothing can precede the
//!   announcement;
//! - [`Emitter::error`] and [`Emitter::complete`] take `self` by value — once
//!   a terminal event is published the emitter is gone, so nothing can follow
//!   it;
//! - the emitter is not `Clone`, so there is no second handle to race with.
//!
//! Cancellation is advisory: [`Emitter::next`] still publishes after the
//! consumer cancelled. A cooperative producer checks
//! [`Emitter::is_cancelled`] (or awaits [`Emitter::cancelled`]) and terminates
//! the stream itself.

use std::sync::Arc;

use crate::events::{Bus, Event};
use crate::stream::{Subscription, SubscriptionId};

/// Publishes the lifecycle events of one subscription.
///
/// ## Example
/// ```rust
/// use stringbus::{Config, Relay};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let relay = Relay::new(Config::default(), Vec::new());
/// let (emitter, handle) = relay.open();
///
/// emitter.next("partial result");
/// if emitter.is_cancelled() {
///     emitter.error(Some("cancelled by consumer"));
/// } else {
///     emitter.complete();
/// }
/// # let _ = handle;
/// # }
/// ```
#[derive(Debug)]
pub struct Emitter {
    subscription: Subscription,
    bus: Bus,
}

impl Emitter {
    pub(crate) fn new(subscription: Subscription, bus: Bus) -> Self {
        Self { subscription, bus }
    }

    /// Id of the subscription this emitter feeds.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// True once the consumer requested cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.subscription.is_cancelled()
    }

    /// Completes when the consumer requests cancellation.
    pub async fn cancelled(&self) {
        self.subscription.cancelled().await;
    }

    /// Publishes one text value.
    ///
    /// Non-blocking, fire-and-forget: if the relay was shut down the event is
    /// dropped silently.
    pub fn next(&self, value: impl Into<Arc<str>>) {
        self.bus.publish(Event::next(self.id(), value));
    }

    /// Publishes the error terminal event and consumes the emitter.
    ///
    /// The message is optional; pass `None` when the failure has no useful
    /// description.
    pub fn error(self, reason: Option<&str>) {
        self.bus.publish(Event::error(self.id(), reason));
    }

    /// Publishes the completion terminal event and consumes the emitter.
    pub fn complete(self) {
        self.bus.publish(Event::completed(self.id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    fn emitter_with_receiver() -> (Emitter, tokio::sync::broadcast::Receiver<Event>) {
        let bus = Bus::new(16);
        let rx = bus.subscribe();
        let handle = Subscription::new(SubscriptionId::next());
        (Emitter::new(handle, bus), rx)
    }

    #[tokio::test]
    async fn test_next_publishes_value() {
        let (emitter, mut rx) = emitter_with_receiver();
        emitter.next("a");

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.subscription, emitter.id());
        match ev.kind {
            EventKind::Next { value } => assert_eq!(&*value, "a"),
            other => panic!("unexpected kind: {}", other.as_label()),
        }
    }

    #[tokio::test]
    async fn test_complete_is_terminal_and_consumes() {
        let (emitter, mut rx) = emitter_with_receiver();
        emitter.next("a");
        emitter.complete();

        let first = rx.recv().await.expect("value event");
        assert!(!first.is_terminal());
        let second = rx.recv().await.expect("terminal event");
        assert!(matches!(second.kind, EventKind::Completed));
    }

    #[tokio::test]
    async fn test_error_carries_optional_reason() {
        let (emitter, mut rx) = emitter_with_receiver();
        emitter.error(Some("timeout"));

        let ev = rx.recv().await.expect("event");
        match ev.kind {
            EventKind::Error { reason } => assert_eq!(reason.as_deref(), Some("timeout")),
            other => panic!("unexpected kind: {}", other.as_label()),
        }

        let (emitter, mut rx) = emitter_with_receiver();
        emitter.error(None);
        let ev = rx.recv().await.expect("event");
        match ev.kind {
            EventKind::Error { reason } => assert!(reason.is_none()),
            other => panic!("unexpected kind: {}", other.as_label()),
        }
    }

    #[tokio::test]
    async fn test_cancellation_is_observable() {
        let bus = Bus::new(4);
        let handle = Subscription::new(SubscriptionId::next());
        let emitter = Emitter::new(handle.clone(), bus);

        assert!(!emitter.is_cancelled());
        handle.cancel();
        assert!(emitter.is_cancelled());
        emitter.cancelled().await;
    }
}
