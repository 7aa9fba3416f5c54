use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market quote for a symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol the quote was fetched for
    pub symbol: String,

    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Closing/current price
    pub close: Decimal,

    /// Quote currency as reported by the provider. Empty when unknown.
    pub currency: String,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        close: Decimal,
        currency: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            close,
            currency: currency.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new("VOO", Utc::now(), dec!(432.10), "USD", "YAHOO");
        assert_eq!(quote.symbol, "VOO");
        assert_eq!(quote.close, dec!(432.10));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.source, "YAHOO");
    }
}
