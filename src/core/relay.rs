//! # Relay: wires the bus to the fan-out and owns graceful shutdown.
//!
//! The [`Relay`] owns the event bus, a [`SubscriberSet`], and the runtime
//! configuration. It spawns the listener that forwards published events to
//! the subscriber workers, mints new subscriptions, and drains everything on
//! shutdown.
//!
//! ## Key responsibilities
//! - subscribe to the [`Bus`] and **fan-out** events via [`SubscriberSet`]
//! - announce new operations: publish `Subscribed` and hand out the
//!   [`Emitter`]/[`Subscription`] pair
//! - perform graceful shutdown with a configurable [`Config::grace`]
//!
//! ## High-level architecture
//! ```text
//! Construction:
//!   Relay::new(cfg, subscribers)
//!     ├─ Bus::new(cfg.bus_capacity_clamped())
//!     ├─ SubscriberSet::new(subscribers)      (one worker per subscriber)
//!     └─ listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!
//! Per operation:
//!   relay.open()
//!     ├─ mint SubscriptionId + Subscription (cancellation token)
//!     ├─ Bus.publish(Subscribed { handle })          (strictly first)
//!     └─ return (Emitter, Subscription)
//!
//! Event flow:
//!   Emitter ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                                                  ┌─────────┬─────────┐
//!                                                  ▼         ▼         ▼
//!                                           [queue S1] [queue S2] ... [queue SN]
//!                                                  │         │         │
//!                                           worker S1 worker S2 ... worker SN
//!                                                  │         │         │
//!                                        on_subscribe / on_next / on_error / on_completed
//!
//! Shutdown path:
//!   relay.shutdown()
//!     ├─ stop listener (drains events already published)
//!     └─ SubscriberSet::shutdown(cfg.grace):
//!          ├─ Ok (all drained)  → Ok(())
//!          └─ window exceeded   → Err(RelayError::GraceExceeded { stuck })
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::error::RelayError;
use crate::events::{Bus, Event};
use crate::stream::{Emitter, Subscription, SubscriptionId};
use crate::subscribers::{StringSubscriber, SubscriberSet};

/// Coordinates event delivery to subscribers and graceful shutdown.
pub struct Relay {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    listener: JoinHandle<()>,
    stop: CancellationToken,
}

impl Relay {
    /// Creates a new relay with the given config and the provided subscribers.
    ///
    /// Spawns one worker per subscriber plus the bus listener; must be called
    /// within a Tokio runtime.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn StringSubscriber>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers));
        let stop = CancellationToken::new();
        let listener = Self::spawn_listener(&bus, &subs, &stop);

        Self {
            cfg,
            bus,
            subs,
            listener,
            stop,
        }
    }

    /// Announces one string-producing operation.
    ///
    /// Publishes the `Subscribed` announcement (so it reaches every
    /// subscriber strictly before any value) and returns the producer-side
    /// [`Emitter`] together with the consumer-side [`Subscription`] handle —
    /// the same handle subscribers receive via `on_subscribe`.
    pub fn open(&self) -> (Emitter, Subscription) {
        let handle = Subscription::new(SubscriptionId::next());
        self.bus.publish(Event::subscribed(handle.clone()));
        let emitter = Emitter::new(handle.clone(), self.bus.clone());
        (emitter, handle)
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }

    /// Stops the listener and drains subscriber queues.
    ///
    /// Events published before this call are still delivered. Emitters that
    /// outlive the relay keep working but publish into the void.
    ///
    /// Returns [`RelayError::GraceExceeded`] when some subscriber could not
    /// drain its queue within [`Config::grace`]; its worker is aborted.
    pub async fn shutdown(self) -> Result<(), RelayError> {
        self.stop.cancel();
        let _ = self.listener.await;

        // The listener held the only other reference to the set.
        let Ok(set) = Arc::try_unwrap(self.subs) else {
            eprintln!("[stringbus] subscriber set still shared at shutdown; skipping drain");
            return Ok(());
        };

        let grace = self.cfg.grace;
        set.shutdown(grace)
            .await
            .map_err(|stuck| RelayError::GraceExceeded { grace, stuck })
    }

    /// Forwards bus events to the subscriber set until stopped.
    ///
    /// On stop, events already sitting in the broadcast buffer are drained
    /// first so a publish followed by `shutdown()` is never lost.
    fn spawn_listener(
        bus: &Bus,
        subs: &Arc<SubscriberSet>,
        stop: &CancellationToken,
    ) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let set = Arc::clone(subs);
        let stop = stop.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    ev = rx.recv() => match ev {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            eprintln!("[stringbus] listener lagged, skipped {n} events");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = stop.cancelled() => {
                        loop {
                            match rx.try_recv() {
                                Ok(ev) => set.emit(&ev),
                                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                                    eprintln!("[stringbus] listener lagged, skipped {n} events");
                                }
                                Err(_) => break,
                            }
                        }
                        break;
                    }
                }
            }
        })
    }
}
