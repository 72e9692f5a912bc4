//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints each callback to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [subscribed] id=sub-0
//! [next] value="alpha"
//! [error] reason="timeout"
//! [error] reason=<none>
//! [completed]
//! ```

use async_trait::async_trait;

use crate::stream::Subscription;

use super::StringSubscriber;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable callback
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`StringSubscriber`]
/// for structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl StringSubscriber for LogWriter {
    async fn on_subscribe(&self, subscription: &Subscription) {
        println!("[subscribed] id={}", subscription.id());
    }

    async fn on_next(&self, value: &str) {
        println!("[next] value={value:?}");
    }

    async fn on_error(&self, message: Option<&str>) {
        match message {
            Some(reason) => println!("[error] reason={reason:?}"),
            None => println!("[error] reason=<none>"),
        }
    }

    async fn on_completed(&self) {
        println!("[completed]");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
