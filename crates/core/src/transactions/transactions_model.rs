use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::idempotency::compute_transaction_hash;
use crate::errors::{Result, ValidationError};

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
}

impl TransactionStatus {
    /// Read the broker's status field. Anything not marked pending is
    /// treated as completed.
    pub fn from_broker(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("pending") || s.starts_with("ממתין") => {
                TransactionStatus::Pending
            }
            _ => TransactionStatus::Completed,
        }
    }
}

/// A normalized Spark account transaction (`StructAccountTransaction`).
#[derive(Debug, Clone, Deserialize)]
pub struct SparkTransaction {
    #[serde(rename = "TransactionDate")]
    pub transaction_date: String,

    #[serde(rename = "ActionType", default)]
    pub action_type: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    #[serde(rename = "SecurityName", default)]
    pub security_name: Option<String>,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    #[serde(rename = "Status", default)]
    pub status: Option<String>,

    #[serde(rename = "Reference", default)]
    pub reference: Option<Value>,
}

impl SparkTransaction {
    pub fn from_record(record: &Value) -> Result<Self> {
        Ok(serde_json::from_value(record.clone())?)
    }

    /// Build the store row for this transaction.
    pub fn into_row(self, company_id: &str, account_number: &str) -> Result<TransactionRow> {
        let date = parse_broker_datetime(&self.transaction_date)?;

        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .or(self.action_type)
            .ok_or_else(|| ValidationError::MissingField("Description".to_string()))?;
        let memo = self.security_name.filter(|m| !m.trim().is_empty());

        let hash = compute_transaction_hash(
            &date,
            self.amount,
            &description,
            memo.as_deref(),
            company_id,
            account_number,
        );

        let identifier = self.reference.and_then(|r| match r {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(TransactionRow {
            date,
            charged_amount: self.amount,
            description,
            memo,
            category: None,
            account: account_number.to_string(),
            hash,
            identifier,
            status: TransactionStatus::from_broker(self.status.as_deref()),
        })
    }
}

/// Parse a broker timestamp. Spark sends local-less ISO strings
/// (`2024-03-01T00:00:00`), sometimes with an offset, sometimes a bare date.
pub fn parse_broker_datetime(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ValidationError::InvalidInput(format!("invalid date '{}'", raw)))?;
    Ok(midnight.and_utc())
}

/// Store-ready transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub date: DateTime<Utc>,
    pub charged_amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub category: Option<String>,
    pub account: String,
    pub hash: String,
    pub identifier: Option<String>,
    pub status: TransactionStatus,
}

impl TransactionRow {
    /// Cells in transactions worksheet column order.
    pub fn to_sheet_row(&self, scraped_at: &str, scraped_by: &str) -> Vec<String> {
        vec![
            self.date.format("%m-%d-%Y").to_string(),
            self.charged_amount.normalize().to_string(),
            self.description.clone(),
            self.memo.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.account.clone(),
            self.hash.clone(),
            String::new(),
            scraped_at.to_string(),
            scraped_by.to_string(),
            self.identifier.clone().unwrap_or_default(),
        ]
    }
}
