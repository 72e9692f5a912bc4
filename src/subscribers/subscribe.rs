//! # Core subscriber contract
//!
//! `StringSubscriber` is the four-callback surface through which a producer
//! reports the lifecycle of one asynchronous string-emitting operation. Each
//! registered subscriber is driven by a dedicated worker loop fed by a bounded
//! queue owned by the [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! For any one subscription the producer calls, in order:
//! - [`on_subscribe`](StringSubscriber::on_subscribe) — exactly once, strictly first;
//! - [`on_next`](StringSubscriber::on_next) — zero or more times;
//! - [`on_error`](StringSubscriber::on_error) **xor**
//!   [`on_completed`](StringSubscriber::on_completed) — at most once, terminal;
//! - nothing after the terminal call.
//!
//! The trait itself does not enforce the ordering — it only names the
//! transitions. Producers going through [`Emitter`](crate::Emitter) cannot
//! violate it; [`SequenceTracker`](crate::SequenceTracker) detects violations
//! from direct callers.
//!
//! ## Delivery
//! - Implementations may be slow (I/O, batching, retries) – they do **not**
//!   block the publisher nor other subscribers.
//! - Each subscriber **declares** its preferred queue capacity via
//!   [`StringSubscriber::queue_capacity`]. If a queue overflows, events for
//!   that subscriber are **dropped** (warn).
//! - Callbacks may run on any worker task/thread; implementations must not
//!   assume thread affinity.
//!
//! ## Example (skeleton)
//! ```rust
//! // use stringbus::{StringSubscriber, Subscription};
//! //
//! // struct Audit;
//! // #[async_trait::async_trait]
//! // impl StringSubscriber for Audit {
//! //     async fn on_subscribe(&self, subscription: &Subscription) { /* note the handle */ }
//! //     async fn on_next(&self, value: &str) { /* write audit record */ }
//! //     async fn on_error(&self, message: Option<&str>) { /* record failure */ }
//! //     async fn on_completed(&self) { /* record completion */ }
//! //     fn name(&self) -> &'static str { "audit" }
//! //     fn queue_capacity(&self) -> usize { 512 }
//! // }
//! ```

use async_trait::async_trait;

use crate::stream::Subscription;

/// Contract for lifecycle subscribers of one string-emitting operation.
///
/// Called from a subscriber-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait StringSubscriber: Send + Sync + 'static {
    /// The operation was announced. Called exactly once, before any other
    /// method, delivering the opaque handle for the in-flight operation.
    ///
    /// The handle permits optional cancellation via
    /// [`Subscription::cancel`]; keep a clone if you may want it later.
    async fn on_subscribe(&self, subscription: &Subscription);

    /// One emitted text value. Called zero or more times, strictly between
    /// `on_subscribe` and any terminal call.
    async fn on_next(&self, value: &str);

    /// The operation failed. Terminal: no further calls will follow.
    ///
    /// # Parameters
    /// - `message`: optional failure description (`None` when the producer
    ///   supplied no message)
    async fn on_error(&self, message: Option<&str>);

    /// The stream is exhausted normally. Terminal: no further calls will follow.
    async fn on_completed(&self);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    ///
    /// On overflow, events for this subscriber are **dropped** (warn).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
