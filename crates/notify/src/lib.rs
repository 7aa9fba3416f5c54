//! Chat notifications for spark-sync.

mod errors;
mod telegram;

pub use errors::NotifyError;
pub use sparksync_core::notifier::NoopNotifier;
pub use telegram::{TelegramNotifier, TELEGRAM_API_URL};
