//! Ticker string helpers.

use crate::constants::{LOCAL_EXCHANGE_PREFIX, LOCAL_EXCHANGE_SUFFIX, LOCAL_TICKER_SEPARATOR_POSITION};

/// Remove the first occurrence of `pattern` from `value`.
pub fn strip_first(value: &str, pattern: &str) -> String {
    value.replacen(pattern, "", 1)
}

/// Reformat a Yahoo Tel Aviv symbol into the sheet's local ticker format.
///
/// `"TEVA.TA"` becomes `"TLV:TE.VA"`, `"LUMI-M.TA"` becomes `"TLV:LU.MIM"`.
/// Positions are counted in characters so non-ASCII input never splits a
/// code point.
pub fn yahoo_to_local_ticker(yahoo_symbol: &str) -> String {
    let symbol = yahoo_symbol.replacen('-', ".", 1);
    let symbol = strip_first(&symbol, LOCAL_EXCHANGE_SUFFIX);
    let prefixed = format!("{}{}", LOCAL_EXCHANGE_PREFIX, symbol);
    let prefixed = strip_first(&prefixed, ".");

    let head: String = prefixed.chars().take(LOCAL_TICKER_SEPARATOR_POSITION).collect();
    let tail: String = prefixed.chars().skip(LOCAL_TICKER_SEPARATOR_POSITION).collect();
    format!("{}.{}", head, tail)
}
