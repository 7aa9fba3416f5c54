//! Dedup and threshold filtering performed before rows are written.
//!
//! Pure computation: no I/O happens here. The caller supplies the candidate
//! rows and, for transactions, the hash index loaded from the store.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::stats::SaveStats;
use crate::constants::MIN_SAVED_QUANTITY;
use crate::holdings::HoldingRow;
use crate::transactions::{TransactionRow, TransactionStatus};

/// Rows to write plus the stats describing the decision.
#[derive(Debug, Clone, PartialEq)]
pub struct SavePlan<T> {
    pub rows: Vec<T>,
    pub stats: SaveStats,
}

/// Holdings below the minimum quantity are skipped as pending; holdings
/// never count as existing.
pub fn plan_holdings_save(name: &str, table: &str, rows: &[HoldingRow]) -> SavePlan<HoldingRow> {
    let min_quantity = Decimal::from(MIN_SAVED_QUANTITY);
    let mut stats = SaveStats::new(name, table, rows.len());
    let mut to_write = Vec::with_capacity(rows.len());

    for row in rows {
        if row.quantity < min_quantity {
            stats.count_pending();
            continue;
        }
        to_write.push(row.clone());
    }

    stats.added = to_write.len();
    SavePlan {
        rows: to_write,
        stats,
    }
}

/// Transactions whose hash is already stored are skipped as existing; the
/// remaining pending ones are skipped as pending.
pub fn plan_transactions_save(
    name: &str,
    table: &str,
    rows: &[TransactionRow],
    existing: &HashSet<String>,
) -> SavePlan<TransactionRow> {
    let mut stats = SaveStats::new(name, table, rows.len());
    let mut to_write = Vec::with_capacity(rows.len());

    for row in rows {
        if existing.contains(&row.hash) {
            stats.count_existing();
            continue;
        }
        if row.status == TransactionStatus::Pending {
            stats.count_pending();
            continue;
        }
        to_write.push(row.clone());
    }

    stats.added = to_write.len();
    SavePlan {
        rows: to_write,
        stats,
    }
}
