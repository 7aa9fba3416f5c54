//! spark-sync market data crate.
//!
//! Symbol search and latest-quote lookups used to turn broker holdings into
//! tradable tickers.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +----------------------+
//! | Ticker resolver  | --> |  MarketDataProvider  |  (search, latest quote)
//! +------------------+     +----------------------+
//!                                    |
//!                                    v
//!                          +------------------+
//!                          |  YahooProvider   |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SearchResult`] - One match returned by a symbol search
//! - [`Quote`] - Latest price and its currency
//! - [`QuoteType`] - Normalized instrument type reported by the provider

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{Quote, QuoteType, SearchResult};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
