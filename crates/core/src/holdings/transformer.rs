use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use sparksync_market_data::MarketDataProvider;

use super::holdings_model::{HoldingRow, SparkHolding};
use super::resolver::TickerResolver;
use super::skip_reason::SkipReason;
use crate::constants::COST_PER_SHARE_DECIMALS;

/// Outcome counts of a batch transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub total: usize,
    pub resolved: usize,
    pub skipped: usize,
}

/// Turns normalized broker holdings into store-ready rows.
pub struct HoldingTransformer {
    resolver: TickerResolver,
}

impl HoldingTransformer {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            resolver: TickerResolver::new(provider),
        }
    }

    /// Transform a single holding. Closed positions are rejected before any
    /// lookup is issued.
    pub async fn transform(&self, holding: &SparkHolding) -> Result<HoldingRow, SkipReason> {
        let quantity = holding.quantity;
        if quantity <= Decimal::ZERO {
            return Err(SkipReason::EmptyPosition);
        }

        let resolved = self.resolver.resolve(holding).await?;

        if resolved.ticker.trim().is_empty() {
            return Err(SkipReason::EmptyTicker);
        }
        if resolved.currency.trim().is_empty() {
            return Err(SkipReason::MissingCurrency {
                ticker: resolved.ticker,
            });
        }

        let total = holding.cost_basis_total();
        let cost_per_share =
            cost_per_share(total, quantity).ok_or_else(|| SkipReason::InvalidCostBasis {
                ticker: resolved.ticker.clone(),
                total,
                quantity,
            })?;

        Ok(HoldingRow {
            ticker: resolved.ticker,
            quantity,
            cost_per_share,
            category: resolved.category,
            currency: resolved.currency,
        })
    }

    /// Parse and transform a normalized record.
    pub async fn transform_record(&self, record: &Value) -> Result<HoldingRow, SkipReason> {
        let holding = SparkHolding::from_record(record).map_err(|e| SkipReason::InvalidRecord {
            message: e.to_string(),
        })?;
        self.transform(&holding).await
    }

    /// Transform all records concurrently. A failing holding never affects
    /// its siblings; skips are logged and counted.
    pub async fn transform_all(&self, records: &[Value]) -> (Vec<HoldingRow>, TransformReport) {
        let outcomes = join_all(records.iter().map(|record| self.transform_record(record))).await;

        let mut rows = Vec::with_capacity(outcomes.len());
        let mut report = TransformReport {
            total: outcomes.len(),
            ..Default::default()
        };

        for (record, outcome) in records.iter().zip(outcomes) {
            match outcome {
                Ok(row) => {
                    report.resolved += 1;
                    rows.push(row);
                }
                Err(reason) => {
                    report.skipped += 1;
                    let symbol = record
                        .get("SYMBOL_NAM")
                        .and_then(Value::as_str)
                        .unwrap_or("<unknown>");
                    debug!("Skipping holding {}: {}", symbol, reason);
                }
            }
        }

        info!(
            "Transformed {} holdings: {} resolved, {} skipped",
            report.total, report.resolved, report.skipped
        );

        (rows, report)
    }
}

/// Total cost divided by quantity, rounded half away from zero. `None` for a
/// zero quantity or a quotient outside the `Decimal` range.
pub fn cost_per_share(total: Decimal, quantity: Decimal) -> Option<Decimal> {
    total
        .checked_div(quantity)
        .map(|c| c.round_dp_with_strategy(COST_PER_SHARE_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
}
