//! One operation, two handles.
//!
//! A call to [`Relay::open`](crate::Relay::open) announces one
//! string-producing operation and returns its two sides:
//!
//! - [`Emitter`] — the producer side; publishes values and exactly one
//!   terminal event, with the sequence contract enforced by its shape.
//! - [`Subscription`] — the consumer side; an opaque handle (id +
//!   cancellation token) delivered to every subscriber via `on_subscribe`.

mod emitter;
mod subscription;

pub use emitter::Emitter;
pub use subscription::{Subscription, SubscriptionId};
