//! Yahoo Finance market data provider.
//!
//! Symbol search goes through the `yahoo_finance_api` connector. Latest quotes
//! come from the quoteSummary price module (crumb authenticated), falling back
//! to the public v8 chart endpoint.

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{Quote, SearchResult};
use crate::provider::MarketDataProvider;

use models::{YahooChartResponse, YahooQuoteSummaryResponse};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const QUERY_BASE_URL: &str = "https://query1.finance.yahoo.com";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| provider_error(
            format!("Failed to initialize Yahoo connector: {}", e),
        ))?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }

        self.fetch_crumb().await
    }

    fn cached_crumb(&self) -> Option<CrumbData> {
        self.crumb.read().ok().and_then(|guard| guard.clone())
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie".to_string()))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get(format!("{}/v1/test/getcrumb", QUERY_BASE_URL))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };

        if let Ok(mut guard) = self.crumb.write() {
            *guard = Some(crumb_data.clone());
        }

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        if let Ok(mut guard) = self.crumb.write() {
            *guard = None;
        }
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Fetch latest quote using the quoteSummary price module.
    async fn fetch_quote_summary(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            QUERY_BASE_URL,
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Quote request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(provider_error("Yahoo authentication expired".to_string()));
        }
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse quote response: {}", e)))?;

        let price = data
            .quote_summary
            .result
            .into_iter()
            .next()
            .and_then(|r| r.price)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let close = price
            .regular_market_price
            .as_ref()
            .and_then(|p| p.raw)
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("No valid price for {}", symbol),
            })?;

        Ok(Quote::new(
            symbol,
            market_time(price.regular_market_time),
            close,
            price.currency.unwrap_or_default(),
            PROVIDER_ID,
        ))
    }

    /// Fetch latest quote using the v8 chart metadata.
    async fn fetch_chart_meta(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=1d&interval=1d",
            QUERY_BASE_URL,
            encode(symbol)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| provider_error(format!("Chart request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse chart response: {}", e)))?;

        let meta = data
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|r| r.meta)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let close = meta
            .regular_market_price
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("No valid price for {}", symbol),
            })?;

        Ok(Quote::new(
            meta.symbol.unwrap_or_else(|| symbol.to_string()),
            market_time(meta.regular_market_time),
            close,
            meta.currency.unwrap_or_default(),
            PROVIDER_ID,
        ))
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest quote for {} from Yahoo", symbol);

        match self.fetch_quote_summary(symbol).await {
            Ok(quote) => return Ok(quote),
            Err(e) => {
                debug!(
                    "quoteSummary fetch failed for {}: {}, trying chart",
                    symbol, e
                );
            }
        }

        self.fetch_chart_meta(symbol).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let encoded_query = encode(query);

        debug!("Searching Yahoo for '{}'", query);

        let result = self
            .connector
            .search_ticker(&encoded_query)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes) {
                    MarketDataError::SymbolNotFound(query.to_string())
                } else {
                    provider_error(e.to_string())
                }
            });

        let result = match result {
            Ok(result) => result,
            Err(MarketDataError::SymbolNotFound(_)) => {
                warn!("Yahoo search returned nothing for '{}'", query);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let search_results = result
            .quotes
            .iter()
            .map(|item| {
                SearchResult::new(
                    &item.symbol,
                    &item.long_name,
                    &item.exchange,
                    &item.quote_type,
                )
            })
            .collect();

        Ok(search_results)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_error(message: String) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}

/// Convert a Yahoo unix market time, falling back to now.
fn market_time(ts: Option<i64>) -> DateTime<Utc> {
    ts.and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_time_from_unix() {
        let time = market_time(Some(1_700_000_000));
        assert_eq!(time.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_market_time_missing_falls_back_to_now() {
        let before = Utc::now();
        let time = market_time(None);
        assert!(time >= before);
    }

    #[test]
    fn test_provider_error_carries_provider_id() {
        match provider_error("boom".to_string()) {
            MarketDataError::ProviderError { provider, message } => {
                assert_eq!(provider, "YAHOO");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
