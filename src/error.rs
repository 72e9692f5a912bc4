//! Error types used by the stringbus runtime and the subscriber contract.
//!
//! This module defines two main error enums:
//!
//! - [`RelayError`] — errors raised by the delivery runtime itself.
//! - [`ProtocolError`] — violations of the subscriber call-sequence contract,
//!   as detected by [`SequenceTracker`](crate::SequenceTracker).
//!
//! Both types provide `as_label` helpers for logging/metrics; [`RelayError`]
//! additionally provides `as_message`.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the stringbus runtime.
///
/// These represent failures in the delivery system itself,
/// such as a shutdown sequence exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RelayError {
    /// Shutdown grace period was exceeded; some subscriber workers did not drain in time
    /// and had to be aborted.
    #[error("shutdown grace {grace:?} exceeded; stuck subscribers: {stuck:?}; aborting workers")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of subscribers whose workers did not finish in time.
        stuck: Vec<String>,
    },
}

impl RelayError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stringbus::RelayError;
    /// use std::time::Duration;
    ///
    /// let err = RelayError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "relay_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RelayError::GraceExceeded { .. } => "relay_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RelayError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck subscribers={stuck:?}")
            }
        }
    }
}

/// # Violations of the subscriber call-sequence contract.
///
/// For any one subscription the valid sequence is: exactly one `on_subscribe`
/// first, zero or more `on_next`, then at most one terminal call (`on_error`
/// xor `on_completed`), and nothing afterwards.
///
/// The [`Emitter`](crate::Emitter) API makes these violations unrepresentable
/// on the producer side; this type exists for conformance checking of callers
/// that drive a [`StringSubscriber`](crate::StringSubscriber) directly.
///
/// The `kind` field carries the offending method name (`"on_next"`,
/// `"on_error"`, `"on_completed"`, `"on_subscribe"`).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A notification arrived before `on_subscribe`.
    #[error("{kind} before on_subscribe")]
    BeforeSubscribe {
        /// The method that was called too early.
        kind: &'static str,
    },

    /// `on_subscribe` was called more than once for the same stream.
    #[error("duplicate on_subscribe")]
    DuplicateSubscribe,

    /// A notification arrived after a terminal event. A second terminal call
    /// is reported through this variant as well.
    #[error("{kind} after a terminal event")]
    AfterTerminal {
        /// The method that was called after termination.
        kind: &'static str,
    },
}

impl ProtocolError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stringbus::ProtocolError;
    ///
    /// let err = ProtocolError::BeforeSubscribe { kind: "on_next" };
    /// assert_eq!(err.as_label(), "before_subscribe");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProtocolError::BeforeSubscribe { .. } => "before_subscribe",
            ProtocolError::DuplicateSubscribe => "duplicate_subscribe",
            ProtocolError::AfterTerminal { .. } => "after_terminal",
        }
    }
}
