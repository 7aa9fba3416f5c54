//! spark-sync core - normalization, ticker resolution and save bookkeeping.
//!
//! This crate contains the decision logic of the sync pipeline. It talks to
//! the outside world only through traits: [`MarketDataProvider`] for symbol
//! lookups, [`storage::Storage`] / [`storage::WorksheetBackend`] for the
//! spreadsheet store and [`notifier::Notifier`] for chat notifications.
//!
//! [`MarketDataProvider`]: sparksync_market_data::MarketDataProvider

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod notifier;
pub mod response_keys;
pub mod scrape;
pub mod storage;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use scrape::{AccountData, ScrapeResult};
