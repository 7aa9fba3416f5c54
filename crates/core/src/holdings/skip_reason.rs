//! Why a holding was dropped instead of becoming a row.

use std::fmt;

use rust_decimal::Decimal;

/// Why a holding was skipped during transformation.
///
/// Skips are the normal soft-fail path: the holding is dropped, siblings carry
/// on, and the reason only shows up in debug logs and aggregate counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The record could not be parsed as a holding.
    InvalidRecord { message: String },

    /// Quantity is zero or negative (closed position).
    EmptyPosition,

    /// The broker instrument type has no resolution rule.
    UnsupportedInstrument { code: String },

    /// Symbol search returned no match.
    NoSearchMatch { query: String },

    /// The provider's type descriptor maps to no holding category.
    UnmappedCategory { ticker: String, quote_type: String },

    /// The provider reported no currency for the ticker.
    MissingCurrency { ticker: String },

    /// The derived ticker is empty.
    EmptyTicker,

    /// A lookup call failed (network, rate limit, provider error).
    LookupFailed { message: String },

    /// Cost per share is not representable (quotient out of range).
    InvalidCostBasis {
        ticker: String,
        total: Decimal,
        quantity: Decimal,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidRecord { message } => write!(f, "invalid record: {}", message),
            SkipReason::EmptyPosition => write!(f, "empty position"),
            SkipReason::UnsupportedInstrument { code } => {
                write!(f, "unsupported instrument type '{}'", code)
            }
            SkipReason::NoSearchMatch { query } => write!(f, "no search match for '{}'", query),
            SkipReason::UnmappedCategory { ticker, quote_type } => {
                write!(f, "{}: unmapped category '{}'", ticker, quote_type)
            }
            SkipReason::MissingCurrency { ticker } => write!(f, "{}: missing currency", ticker),
            SkipReason::EmptyTicker => write!(f, "empty ticker"),
            SkipReason::LookupFailed { message } => write!(f, "lookup failed: {}", message),
            SkipReason::InvalidCostBasis {
                ticker,
                total,
                quantity,
            } => write!(
                f,
                "{}: cost basis {} over quantity {} is out of range",
                ticker, total, quantity
            ),
        }
    }
}
