//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Quote, SearchResult};

/// Trait for market data providers.
///
/// The ticker resolver only needs two capabilities: free-text symbol search
/// and the latest quote of a known symbol.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use sparksync_market_data::{MarketDataError, MarketDataProvider, Quote, SearchResult};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         // ...
///     }
///
///     async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// The returned quote carries the currency the symbol trades in.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Search for symbols matching the query.
    ///
    /// Results are ordered by provider relevance; an empty vector means no match.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError>;
}
