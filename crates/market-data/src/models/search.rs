//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Instrument type reported by a provider for a search match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteType {
    Etf,
    Equity,
    Currency,
    MutualFund,
    Index,
    Cryptocurrency,
    Future,
    Other,
}

impl QuoteType {
    /// Parse a provider type descriptor ("ETF", "EQUITY", "Equity", "CURRENCY", ...).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ETF" => Self::Etf,
            "EQUITY" => Self::Equity,
            "CURRENCY" => Self::Currency,
            "MUTUALFUND" | "FUND" => Self::MutualFund,
            "INDEX" => Self::Index,
            "CRYPTOCURRENCY" => Self::Cryptocurrency,
            "FUTURE" | "FUTURES" => Self::Future,
            _ => Self::Other,
        }
    }
}

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL", "TEVA.TA")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc")
    pub name: String,

    /// Exchange name (e.g., "NMS", "TLV")
    pub exchange: String,

    /// Raw asset type from the provider (e.g., "EQUITY", "ETF")
    pub asset_type: String,
}

impl SearchResult {
    /// Create a new search result with required fields.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            asset_type: asset_type.into(),
        }
    }

    /// The asset type parsed into a [`QuoteType`].
    pub fn quote_type(&self) -> QuoteType {
        QuoteType::parse(&self.asset_type)
    }
}
