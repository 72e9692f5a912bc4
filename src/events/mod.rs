//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted for string-producing
//! operations.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] tagged notification and delivery metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: [`Relay::open`](crate::Relay::open) (the `Subscribed`
//!   announcement) and [`Emitter`](crate::Emitter) (values and terminals).
//! - **Consumer**: the relay listener, which fans out to
//!   [`SubscriberSet`](crate::SubscriberSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
