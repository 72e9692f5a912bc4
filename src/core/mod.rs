//! Runtime core: delivery wiring and lifecycle.
//!
//! This module contains the embedded implementation of the stringbus runtime:
//! the [`Relay`] (bus listener, subscription minting, graceful shutdown) and
//! its [`Config`].

mod config;
mod relay;

pub use config::Config;
pub use relay::Relay;
