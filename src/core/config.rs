//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the relay runtime.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 (see [`Config::bus_capacity_clamped`])
//! - `grace = 0s` → shutdown aborts undrained workers immediately

use std::time::Duration;

/// Global configuration for the relay runtime.
///
/// Defines:
/// - **Event system**: bus capacity for event delivery
/// - **Shutdown behavior**: drain window for subscriber workers
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `grace`: Maximum wait for subscriber queues to drain on shutdown
///   (`0s` = no wait, abort immediately)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// A listener that lags behind more than `bus_capacity` events will
    /// receive `Lagged` and skip older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,

    /// Maximum time to wait for subscriber workers to drain on shutdown.
    ///
    /// When [`Relay::shutdown`](crate::Relay::shutdown) is called:
    /// - Queues are closed; workers process what was already queued
    /// - The relay waits up to `grace` for the workers to exit
    /// - If the window is exceeded, remaining workers are aborted and
    ///   [`RelayError::GraceExceeded`](crate::RelayError::GraceExceeded) is returned
    pub grace: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` should use this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024` (good baseline)
    /// - `grace = 5s` (subscriber queues are small; draining is fast)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.bus_capacity, 1024);
        assert_eq!(cfg.grace, Duration::from_secs(5));
    }

    #[test]
    fn test_bus_capacity_is_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            grace: Duration::ZERO,
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
