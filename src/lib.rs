//! # stringbus
//!
//! **stringbus** delivers lifecycle notifications of asynchronous
//! string-emitting operations to consumer-side subscribers.
//!
//! The crate is built around one contract: [`StringSubscriber`], the
//! four-callback surface a producer invokes to report the lifecycle of a
//! single operation (subscription start, emitted values, error, completion).
//! Everything else is delivery plumbing: a broadcast [`Bus`], a non-blocking
//! fan-out [`SubscriberSet`], and a [`Relay`] that wires them together and
//! owns graceful shutdown.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Relay::open()                      Relay::open()
//!        │                                  │
//!        ▼                                  ▼
//!  ┌───────────┐                      ┌───────────┐
//!  │  Emitter  │ (producer handle)    │  Emitter  │
//!  └─────┬─────┘                      └─────┬─────┘
//!        │ publish(Event)                   │
//!        ▼                                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Bus (broadcast channel)                   │
//! │               (capacity: Config::bus_capacity)                │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 ▼
//!                      ┌────────────────────┐
//!                      │   relay listener   │
//!                      │     (in Relay)     │
//!                      └──────────┬─────────┘
//!                                 ▼
//!                           SubscriberSet
//!                          (per-sub queues)
//!                     ┌──────────┼──────────┐
//!                     ▼          ▼          ▼
//!                  worker1    worker2    workerN
//!                     ▼          ▼          ▼
//!                 on_subscribe / on_next / on_error / on_completed
//! ```
//!
//! ### Lifecycle
//! For any one subscription the delivered sequence is:
//! ```text
//! exactly one  on_subscribe(handle)
//! zero or more on_next(value)
//! at most one  on_error(message) XOR on_completed()
//! nothing afterwards
//! ```
//! The producer API enforces this shape statically: an [`Emitter`] can only
//! be obtained from [`Relay::open`] (which announces the subscription first),
//! and both terminal methods consume the emitter, so no further events can be
//! produced through it. For callers that drive a [`StringSubscriber`]
//! directly, the [`SequenceTracker`] subscriber detects ordering violations
//! and reports them as [`ProtocolError`]s.
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                       |
//! |-------------------|------------------------------------------------------------------|------------------------------------------|
//! | **Subscriber API**| Receive lifecycle callbacks for one string-emitting operation.   | [`StringSubscriber`]                     |
//! | **Events**        | Tagged event representation and broadcast bus.                   | [`Event`], [`EventKind`], [`Bus`]        |
//! | **Producer API**  | Announce, emit, and terminate one operation.                     | [`Relay`], [`Emitter`], [`Subscription`] |
//! | **Conformance**   | Detect call sequences that violate the contract.                 | [`SequenceTracker`], [`ProtocolError`]   |
//! | **Errors**        | Typed errors for the relay runtime and the contract.             | [`RelayError`], [`ProtocolError`]        |
//! | **Configuration** | Centralize runtime settings.                                     | [`Config`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use stringbus::{Config, Relay, SequenceTracker, StringSubscriber, Terminal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracker = Arc::new(SequenceTracker::new());
//!     let subs: Vec<Arc<dyn StringSubscriber>> = vec![tracker.clone()];
//!     let relay = Relay::new(Config::default(), subs);
//!
//!     // Announce one operation; subscribers get on_subscribe first.
//!     let (emitter, _handle) = relay.open();
//!     emitter.next("alpha");
//!     emitter.next("bravo");
//!     emitter.complete();
//!
//!     // Drain queued events and stop the workers.
//!     relay.shutdown().await?;
//!
//!     let report = tracker.snapshot().await;
//!     assert!(report.subscribed);
//!     assert_eq!(report.next_count, 2);
//!     assert_eq!(report.terminal, Some(Terminal::Completed));
//!     assert!(report.violations.is_empty());
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod stream;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, Relay};
pub use error::{ProtocolError, RelayError};
pub use events::{Bus, Event, EventKind};
pub use stream::{Emitter, Subscription, SubscriptionId};
pub use subscribers::{SequenceReport, SequenceTracker, StringSubscriber, SubscriberSet, Terminal};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
