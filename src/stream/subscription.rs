//! # Opaque subscription handle.
//!
//! [`Subscription`] represents one in-flight string-producing operation from
//! the consumer's point of view. It is minted by [`Relay::open`](crate::Relay::open)
//! and delivered to every subscriber exactly once via
//! [`StringSubscriber::on_subscribe`](crate::StringSubscriber::on_subscribe).
//!
//! The handle wraps a [`CancellationToken`]: a consumer that has lost interest
//! may call [`Subscription::cancel`], and the producer can observe the request
//! through [`Emitter::is_cancelled`](crate::Emitter::is_cancelled) (or await
//! it). Nothing beyond the token is defined — how and when a producer reacts
//! to cancellation is the producer's decision.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tokio_util::sync::CancellationToken;

/// Global counter for subscription ids.
static SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of one subscription, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Allocates the next id.
    pub(crate) fn next() -> Self {
        Self(SUBSCRIPTION_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value (for logs/metrics).
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Opaque handle for one in-flight operation.
///
/// Clones share the same id and cancellation token; cancelling any clone
/// cancels them all.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    token: CancellationToken,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId) -> Self {
        Self {
            id,
            token: CancellationToken::new(),
        }
    }

    /// Id of this subscription.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Requests cancellation of the operation.
    ///
    /// Idempotent. The producer observes the request through its
    /// [`Emitter`](crate::Emitter); events already queued are still delivered.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once [`Subscription::cancel`] has been called on any clone.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when the subscription is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}
