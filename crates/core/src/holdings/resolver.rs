use std::sync::Arc;

use log::debug;
use sparksync_market_data::{MarketDataError, MarketDataProvider, QuoteType, SearchResult};

use super::holdings_model::{HoldingCategory, InstrumentType, ResolvedInstrument, SparkHolding};
use super::skip_reason::SkipReason;
use super::ticker::{strip_first, yahoo_to_local_ticker};
use crate::constants::{CASH_SYMBOL_SUFFIX, FOREIGN_SYMBOL_SUFFIX, LOCAL_CURRENCY};

/// Map a provider quote type onto a holding category.
pub fn category_for_quote_type(quote_type: QuoteType) -> Option<HoldingCategory> {
    match quote_type {
        QuoteType::Etf => Some(HoldingCategory::Etf),
        QuoteType::Equity => Some(HoldingCategory::Stocks),
        QuoteType::Currency => Some(HoldingCategory::Cash),
        _ => None,
    }
}

/// Resolves broker holdings to ticker, category and currency.
///
/// Foreign and local-stock holdings consult the market data provider; cash
/// positions are resolved from the symbol alone.
pub struct TickerResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl TickerResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, holding: &SparkHolding) -> Result<ResolvedInstrument, SkipReason> {
        match holding.instrument_type() {
            InstrumentType::ForeignFund | InstrumentType::ForeignStock => {
                self.resolve_foreign(holding).await
            }
            InstrumentType::LocalStock => self.resolve_local(holding).await,
            InstrumentType::Cash => Ok(resolve_cash(holding)),
            InstrumentType::Unrecognized => Err(SkipReason::UnsupportedInstrument {
                code: holding.instrument_code.clone(),
            }),
        }
    }

    async fn resolve_foreign(&self, holding: &SparkHolding) -> Result<ResolvedInstrument, SkipReason> {
        let ticker = strip_first(&holding.symbol_name, FOREIGN_SYMBOL_SUFFIX);

        let (matches, quote) = futures::join!(
            self.provider.search(&ticker),
            self.provider.get_latest_quote(&ticker)
        );

        let first = first_match(matches.map_err(lookup_failed)?, &ticker)?;
        let category = category_of(&first, &ticker)?;
        let currency = quote.map_err(lookup_failed)?.currency;

        if currency.trim().is_empty() {
            return Err(SkipReason::MissingCurrency { ticker });
        }

        Ok(ResolvedInstrument {
            ticker,
            category,
            currency,
        })
    }

    async fn resolve_local(&self, holding: &SparkHolding) -> Result<ResolvedInstrument, SkipReason> {
        let symbol = &holding.symbol_name;
        let matches = self.provider.search(symbol).await.map_err(lookup_failed)?;
        let first = first_match(matches, symbol)?;

        let ticker = yahoo_to_local_ticker(&first.symbol);
        let category = category_of(&first, &ticker)?;

        debug!("Resolved local symbol {} as {} ({})", symbol, ticker, first.symbol);

        Ok(ResolvedInstrument {
            ticker,
            category,
            currency: LOCAL_CURRENCY.to_string(),
        })
    }
}

fn resolve_cash(holding: &SparkHolding) -> ResolvedInstrument {
    let ticker = strip_first(&holding.symbol_name, CASH_SYMBOL_SUFFIX);
    ResolvedInstrument {
        currency: ticker.clone(),
        ticker,
        category: HoldingCategory::Cash,
    }
}

fn first_match(matches: Vec<SearchResult>, query: &str) -> Result<SearchResult, SkipReason> {
    matches
        .into_iter()
        .next()
        .ok_or_else(|| SkipReason::NoSearchMatch {
            query: query.to_string(),
        })
}

fn category_of(result: &SearchResult, ticker: &str) -> Result<HoldingCategory, SkipReason> {
    category_for_quote_type(result.quote_type()).ok_or_else(|| SkipReason::UnmappedCategory {
        ticker: ticker.to_string(),
        quote_type: result.asset_type.clone(),
    })
}

fn lookup_failed(err: MarketDataError) -> SkipReason {
    SkipReason::LookupFailed {
        message: err.to_string(),
    }
}
