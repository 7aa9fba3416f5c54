//! Transactions module - broker transaction parsing and dedup hashing.

mod idempotency;
mod transactions_model;

pub use idempotency::{compute_transaction_hash, round_to_nearest_minute};
pub use transactions_model::{
    parse_broker_datetime, SparkTransaction, TransactionRow, TransactionStatus,
};

use log::warn;
use serde_json::Value;

/// Company identifier used in transaction hashes.
pub fn company_id(broker: &str) -> String {
    format!("spark-{}", broker)
}

/// Convert normalized transaction records to rows, skipping the ones that
/// fail to parse.
pub fn transactions_from_records(
    records: &[Value],
    company_id: &str,
    account_number: &str,
) -> Vec<TransactionRow> {
    records
        .iter()
        .filter_map(|record| {
            match SparkTransaction::from_record(record)
                .and_then(|tx| tx.into_row(company_id, account_number))
            {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("Skipping transaction record for account {}: {}", account_number, e);
                    None
                }
            }
        })
        .collect()
}
