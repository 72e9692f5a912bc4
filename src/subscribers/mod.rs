//! # Lifecycle subscribers.
//!
//! This module provides the [`StringSubscriber`] trait — the four-callback
//! contract a producer invokes for one string-emitting operation — and the
//! fan-out machinery plus built-in implementations.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Emitter ── publish(Event) ──► Bus ──► relay listener ──► SubscriberSet::emit(&Event)
//!                                                                │
//!                                                           ┌────┴────┬─────────┐
//!                                                           ▼         ▼         ▼
//!                                                      LogWriter  Tracker   Custom
//!                                                     (on_subscribe / on_next /
//!                                                      on_error / on_completed)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to callbacks (logging, metrics, alerts)
//! - **Stateful subscribers** - maintain internal state based on callbacks
//!   ([`SequenceTracker`])
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use stringbus::{StringSubscriber, Subscription};
//! use async_trait::async_trait;
//!
//! struct MetricsSubscriber;
//!
//! #[async_trait]
//! impl StringSubscriber for MetricsSubscriber {
//!     async fn on_subscribe(&self, _subscription: &Subscription) {
//!         // mark operation in-flight
//!     }
//!     async fn on_next(&self, _value: &str) {
//!         // increment emission counter
//!     }
//!     async fn on_error(&self, _message: Option<&str>) {
//!         // increment failure counter
//!     }
//!     async fn on_completed(&self) {
//!         // increment completion counter
//!     }
//! }
//! ```

mod set;
mod subscribe;
mod tracker;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::StringSubscriber;
pub use tracker::{SequenceReport, SequenceTracker, Terminal};

#[cfg(feature = "logging")]
pub use log::LogWriter;
