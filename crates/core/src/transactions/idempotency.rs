//! Transaction hash computation for deduplication across runs.
//!
//! The hash is a readable fingerprint of the transaction's content rather than
//! a digest, so rows written by earlier runs can be matched by eye in the sheet.
//! Timestamps are rounded to the nearest minute so a broker that reports the
//! same event a few seconds apart still yields the same hash.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const MINUTE_MILLIS: i64 = 60_000;

/// Round a timestamp to the nearest minute (half a minute rounds up).
pub fn round_to_nearest_minute(timestamp: &DateTime<Utc>) -> DateTime<Utc> {
    let millis = timestamp.timestamp_millis();
    let rounded = (millis + MINUTE_MILLIS / 2).div_euclid(MINUTE_MILLIS) * MINUTE_MILLIS;
    DateTime::from_timestamp_millis(rounded).unwrap_or(*timestamp)
}

/// Compute the dedup hash of a transaction.
///
/// Format: `{rounded ISO timestamp}_{amount}_{description}_{memo}_{company}_{account}`.
/// A missing memo hashes as an empty string.
pub fn compute_transaction_hash(
    date: &DateTime<Utc>,
    charged_amount: Decimal,
    description: &str,
    memo: Option<&str>,
    company_id: &str,
    account_number: &str,
) -> String {
    let rounded = round_to_nearest_minute(date).format("%Y-%m-%dT%H:%M:%S%.3fZ");
    format!(
        "{}_{}_{}_{}_{}_{}",
        rounded,
        charged_amount.normalize(),
        description,
        memo.unwrap_or_default(),
        company_id,
        account_number
    )
}
