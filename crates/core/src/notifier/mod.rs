//! Notifier module - status message channel and run summaries.

mod summary;

pub use summary::{error_message, stats_line, summary_message};

use async_trait::async_trait;
use log::debug;
use std::error::Error as StdError;

/// Reference to a sent message, used to edit it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: String,
    pub message_id: i64,
}

/// Outbound status channel.
///
/// Delivery is best effort: implementations log their own failures and never
/// fail the run.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a new message. Returns `None` when nothing was sent.
    async fn send(&self, text: &str) -> Option<MessageRef>;

    /// Replace the text of a previously sent message. No-op without a reference.
    async fn edit_message(&self, message: Option<&MessageRef>, text: &str);

    /// Report a fatal error together with its source chain.
    async fn send_error(&self, error: &(dyn StdError + Send + Sync), caller: &str) {
        let _ = self.send(&error_message(caller, error)).await;
    }
}

/// Notifier used when no channel is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, text: &str) -> Option<MessageRef> {
        debug!("{}", text);
        None
    }

    async fn edit_message(&self, _message: Option<&MessageRef>, _text: &str) {}
}
