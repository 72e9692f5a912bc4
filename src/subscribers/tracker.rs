//! # Call-sequence conformance tracker.
//!
//! [`SequenceTracker`] is a stateful built-in subscriber that observes one
//! operation's callbacks and checks them against the contract:
//! exactly one `on_subscribe` first, zero or more `on_next`, at most one
//! terminal call, nothing afterwards. Violations are recorded as
//! [`ProtocolError`]s instead of panicking, so the tracker is usable both in
//! conformance tests and as a runtime canary.
//!
//! ## Architecture
//! ```text
//! Emitter ──► Bus ──► relay listener ──► SequenceTracker::on_*()
//!                                               │
//!                                               ▼
//!                                        TrackerState
//!                               (subscribed, values, terminal,
//!                                violations: Vec<ProtocolError>)
//! ```
//!
//! ## Scope
//! The subscriber contract carries no subscription id on `on_next`,
//! `on_error`, or `on_completed`, so one tracker validates **one** operation's
//! stream. With several interleaved subscriptions, attach one tracker per
//! operation (e.g. one relay per operation in tests).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ProtocolError;
use crate::stream::Subscription;

use super::StringSubscriber;

/// Which terminal event ended the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Ended via `on_error`.
    Error,
    /// Ended via `on_completed`.
    Completed,
}

/// Observed state of one operation's callback sequence.
#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    /// True once `on_subscribe` was observed.
    pub subscribed: bool,
    /// Number of `on_next` calls accepted (in-contract calls only).
    pub next_count: u64,
    /// The accepted values, in delivery order.
    pub values: Vec<Arc<str>>,
    /// Terminal event, once one was observed.
    pub terminal: Option<Terminal>,
    /// Message carried by the terminal error, if any.
    pub error_message: Option<Arc<str>>,
    /// Contract violations, in observation order.
    pub violations: Vec<ProtocolError>,
}

impl SequenceReport {
    /// True when the observed sequence satisfied the contract so far.
    #[must_use]
    pub fn is_conformant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Thread-safe conformance tracker for one operation's stream.
///
/// ### Rules
/// - a call after a terminal event → [`ProtocolError::AfterTerminal`]
///   (this also covers a second terminal call);
/// - `on_next`/`on_error`/`on_completed` before `on_subscribe` →
///   [`ProtocolError::BeforeSubscribe`];
/// - a second `on_subscribe` → [`ProtocolError::DuplicateSubscribe`];
/// - in-contract calls update the report (`next_count`, `values`, `terminal`).
pub struct SequenceTracker {
    state: RwLock<SequenceReport>,
}

impl SequenceTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SequenceReport::default()),
        }
    }

    /// Returns a copy of the observed state.
    pub async fn snapshot(&self) -> SequenceReport {
        self.state.read().await.clone()
    }

    /// True once a terminal event was observed.
    pub async fn is_terminated(&self) -> bool {
        self.state.read().await.terminal.is_some()
    }
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StringSubscriber for SequenceTracker {
    async fn on_subscribe(&self, _subscription: &Subscription) {
        let mut state = self.state.write().await;
        if state.terminal.is_some() {
            state
                .violations
                .push(ProtocolError::AfterTerminal { kind: "on_subscribe" });
        } else if state.subscribed {
            state.violations.push(ProtocolError::DuplicateSubscribe);
        } else {
            state.subscribed = true;
        }
    }

    async fn on_next(&self, value: &str) {
        let mut state = self.state.write().await;
        if state.terminal.is_some() {
            state
                .violations
                .push(ProtocolError::AfterTerminal { kind: "on_next" });
        } else if !state.subscribed {
            state
                .violations
                .push(ProtocolError::BeforeSubscribe { kind: "on_next" });
        } else {
            state.next_count += 1;
            state.values.push(Arc::from(value));
        }
    }

    async fn on_error(&self, message: Option<&str>) {
        let mut state = self.state.write().await;
        if state.terminal.is_some() {
            state
                .violations
                .push(ProtocolError::AfterTerminal { kind: "on_error" });
        } else if !state.subscribed {
            state
                .violations
                .push(ProtocolError::BeforeSubscribe { kind: "on_error" });
        } else {
            state.terminal = Some(Terminal::Error);
            state.error_message = message.map(Arc::from);
        }
    }

    async fn on_completed(&self) {
        let mut state = self.state.write().await;
        if state.terminal.is_some() {
            state
                .violations
                .push(ProtocolError::AfterTerminal { kind: "on_completed" });
        } else if !state.subscribed {
            state
                .violations
                .push(ProtocolError::BeforeSubscribe { kind: "on_completed" });
        } else {
            state.terminal = Some(Terminal::Completed);
        }
    }

    fn name(&self) -> &'static str {
        "sequence-tracker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SubscriptionId;

    fn handle() -> Subscription {
        Subscription::new(SubscriptionId::next())
    }

    #[tokio::test]
    async fn test_valid_sequence_with_values_and_completion() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_next("a").await;
        tracker.on_next("b").await;
        tracker.on_completed().await;

        let report = tracker.snapshot().await;
        assert!(report.subscribed);
        assert_eq!(report.next_count, 2);
        assert_eq!(report.values, vec![Arc::from("a"), Arc::from("b")]);
        assert_eq!(report.terminal, Some(Terminal::Completed));
        assert!(report.is_conformant());
    }

    #[tokio::test]
    async fn test_valid_sequence_error_without_emissions() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_error(Some("timeout")).await;

        let report = tracker.snapshot().await;
        assert_eq!(report.next_count, 0);
        assert_eq!(report.terminal, Some(Terminal::Error));
        assert_eq!(report.error_message.as_deref(), Some("timeout"));
        assert!(report.is_conformant());
        assert!(tracker.is_terminated().await);
    }

    #[tokio::test]
    async fn test_error_message_may_be_absent() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_error(None).await;

        let report = tracker.snapshot().await;
        assert_eq!(report.terminal, Some(Terminal::Error));
        assert!(report.error_message.is_none());
        assert!(report.is_conformant());
    }

    #[tokio::test]
    async fn test_next_before_subscribe_is_a_violation() {
        let tracker = SequenceTracker::new();
        tracker.on_next("early").await;

        let report = tracker.snapshot().await;
        assert_eq!(report.next_count, 0);
        assert_eq!(
            report.violations,
            vec![ProtocolError::BeforeSubscribe { kind: "on_next" }]
        );
    }

    #[tokio::test]
    async fn test_next_after_completed_is_a_violation() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_next("a").await;
        tracker.on_completed().await;
        tracker.on_next("late").await;

        let report = tracker.snapshot().await;
        assert_eq!(report.next_count, 1);
        assert_eq!(
            report.violations,
            vec![ProtocolError::AfterTerminal { kind: "on_next" }]
        );
    }

    #[tokio::test]
    async fn test_terminal_events_are_mutually_exclusive() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_error(Some("boom")).await;
        tracker.on_completed().await;

        let report = tracker.snapshot().await;
        // The first terminal wins; the second is recorded as a violation.
        assert_eq!(report.terminal, Some(Terminal::Error));
        assert_eq!(
            report.violations,
            vec![ProtocolError::AfterTerminal { kind: "on_completed" }]
        );
    }

    #[tokio::test]
    async fn test_duplicate_subscribe_is_a_violation() {
        let tracker = SequenceTracker::new();
        tracker.on_subscribe(&handle()).await;
        tracker.on_subscribe(&handle()).await;

        let report = tracker.snapshot().await;
        assert!(report.subscribed);
        assert_eq!(report.violations, vec![ProtocolError::DuplicateSubscribe]);
    }
}
