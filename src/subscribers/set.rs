//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::events::Event) to
//! multiple subscribers **without awaiting** their processing, decoding the
//! tagged event into the matching [`StringSubscriber`] callback.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No retries on per-subscriber queue overflow (events are dropped for that
//!   subscriber).
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_* callback
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_* callback
//!        └────────────────► [queue SN] ─► worker SN ─► on_* callback
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Event, EventKind};

use super::StringSubscriber;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Worker handle with metadata, kept for shutdown accounting.
struct SubscriberWorker {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<SubscriberWorker>,
}

/// Decodes one event into the matching subscriber callback.
async fn deliver(sub: &dyn StringSubscriber, ev: &Event) {
    match &ev.kind {
        EventKind::Subscribed { subscription } => sub.on_subscribe(subscription).await,
        EventKind::Next { value } => sub.on_next(value).await,
        EventKind::Error { reason } => sub.on_error(reason.as_deref()).await,
        EventKind::Completed => sub.on_completed().await,
    }
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn StringSubscriber>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let s = Arc::clone(&sub);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = deliver(s.as_ref(), ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!(
                            "[stringbus] subscriber '{}' panicked: {:?}",
                            s.name(),
                            panic_err
                        );
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(SubscriberWorker { name, handle });
        }

        Self { channels, workers }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is dropped for it
    /// and a warning is logged with the subscriber's name.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    eprintln!(
                        "[stringbus] subscriber '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    eprintln!(
                        "[stringbus] subscriber '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// Graceful shutdown: close all queues, then wait up to `grace` for the
    /// workers to drain what was already queued.
    ///
    /// On timeout the remaining workers are aborted and their names are
    /// returned as the error value.
    pub async fn shutdown(self, grace: Duration) -> Result<(), Vec<String>> {
        drop(self.channels);
        let mut workers = self.workers;

        let drained = async {
            for worker in workers.iter_mut() {
                let _ = (&mut worker.handle).await;
            }
        };
        if tokio::time::timeout(grace, drained).await.is_ok() {
            return Ok(());
        }

        let mut stuck = Vec::new();
        for worker in &workers {
            if !worker.handle.is_finished() {
                worker.handle.abort();
                stuck.push(worker.name.to_string());
            }
        }
        Err(stuck)
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SubscriptionId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every callback it receives.
    struct Counter {
        seen: AtomicUsize,
        capacity: usize,
    }

    impl Counter {
        fn new(capacity: usize) -> Arc<Self> {
            Arc::new(Self {
                seen: AtomicUsize::new(0),
                capacity,
            })
        }

        fn seen(&self) -> usize {
            self.seen.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StringSubscriber for Counter {
        async fn on_subscribe(&self, _subscription: &crate::Subscription) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
        async fn on_next(&self, _value: &str) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
        async fn on_error(&self, _message: Option<&str>) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
        async fn on_completed(&self) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
        fn name(&self) -> &'static str {
            "counter"
        }
        fn queue_capacity(&self) -> usize {
            self.capacity
        }
    }

    /// Panics on every value; used to verify isolation.
    struct Bomb;

    #[async_trait]
    impl StringSubscriber for Bomb {
        async fn on_subscribe(&self, _subscription: &crate::Subscription) {}
        async fn on_next(&self, value: &str) {
            panic!("bomb on {value}");
        }
        async fn on_error(&self, _message: Option<&str>) {}
        async fn on_completed(&self) {}
        fn name(&self) -> &'static str {
            "bomb"
        }
    }

    #[tokio::test]
    async fn test_fan_out_delivers_to_all_subscribers() {
        let a = Counter::new(64);
        let b = Counter::new(64);
        let set = SubscriberSet::new(vec![a.clone(), b.clone()]);
        assert_eq!(set.len(), 2);

        let id = SubscriptionId::next();
        set.emit(&Event::next(id, "one"));
        set.emit(&Event::next(id, "two"));
        set.emit(&Event::completed(id));

        set.shutdown(Duration::from_secs(5)).await.expect("drained");
        assert_eq!(a.seen(), 3);
        assert_eq!(b.seen(), 3);
    }

    #[tokio::test]
    async fn test_panicking_subscriber_is_isolated() {
        let healthy = Counter::new(64);
        let set = SubscriberSet::new(vec![Arc::new(Bomb) as _, healthy.clone()]);

        let id = SubscriptionId::next();
        set.emit(&Event::next(id, "a"));
        set.emit(&Event::next(id, "b"));
        set.emit(&Event::completed(id));

        set.shutdown(Duration::from_secs(5)).await.expect("drained");
        // The bomb panicked on both values, but the healthy subscriber saw everything.
        assert_eq!(healthy.seen(), 3);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_overflow_drops_for_that_subscriber_only() {
        let tiny = Counter::new(1);
        let roomy = Counter::new(64);
        let set = SubscriberSet::new(vec![tiny.clone(), roomy.clone()]);

        // No await between emits: the tiny queue accepts one event and drops
        // the rest, the roomy queue takes all of them.
        let id = SubscriptionId::next();
        for i in 0..5 {
            set.emit(&Event::next(id, format!("v{i}")));
        }

        set.shutdown(Duration::from_secs(5)).await.expect("drained");
        assert_eq!(tiny.seen(), 1);
        assert_eq!(roomy.seen(), 5);
    }

    #[tokio::test]
    async fn test_empty_set_is_harmless() {
        let set = SubscriberSet::new(Vec::new());
        assert!(set.is_empty());
        set.emit(&Event::completed(SubscriptionId::next()));
        set.shutdown(Duration::from_millis(10)).await.expect("empty");
    }

    #[tokio::test]
    async fn test_shutdown_reports_stuck_worker() {
        struct Sleeper;

        #[async_trait]
        impl StringSubscriber for Sleeper {
            async fn on_subscribe(&self, _subscription: &crate::Subscription) {}
            async fn on_next(&self, _value: &str) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            async fn on_error(&self, _message: Option<&str>) {}
            async fn on_completed(&self) {}
            fn name(&self) -> &'static str {
                "sleeper"
            }
        }

        let set = SubscriberSet::new(vec![Arc::new(Sleeper) as _]);
        set.emit(&Event::next(SubscriptionId::next(), "slow"));

        let stuck = set
            .shutdown(Duration::from_millis(50))
            .await
            .expect_err("sleeper cannot drain in time");
        assert_eq!(stuck, vec!["sleeper".to_string()]);
    }
}
