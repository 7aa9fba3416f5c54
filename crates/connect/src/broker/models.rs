//! Spark payload extraction.
//!
//! Spark wraps its answers in loosely typed envelopes. These helpers pull out
//! the parts the pipeline needs and run records through the key normalizer.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use sparksync_core::accounts::Account;
use sparksync_core::errors::{Error, Result};
use sparksync_core::response_keys::{normalize, normalize_as, ResponseType};

/// Static data section listing the user's accounts.
const ACCOUNTS_SECTION: &str = "ACC";

#[derive(Debug, Deserialize)]
struct StaticDataSection {
    #[serde(default)]
    b: Option<String>,
    #[serde(default)]
    a: Vec<StaticAccount>,
}

#[derive(Debug, Deserialize)]
struct StaticAccount {
    #[serde(rename = "_k")]
    key: String,
    a: StaticAccountDetails,
}

#[derive(Debug, Deserialize)]
struct StaticAccountDetails {
    /// Account number
    #[serde(default)]
    b: Option<String>,
    /// Account display name
    #[serde(default)]
    e: Option<String>,
}

/// Extract the accounts from a `GetStaticData` response.
pub fn accounts_from_static_data(payload: Value) -> Result<Vec<Account>> {
    let sections: Vec<Value> = serde_json::from_value(payload)?;

    let section = sections
        .into_iter()
        .filter_map(|s| serde_json::from_value::<StaticDataSection>(s).ok())
        .find(|s| s.b.as_deref() == Some(ACCOUNTS_SECTION))
        .ok_or_else(|| Error::BrokerApi("No account section in static data".to_string()))?;

    Ok(section
        .a
        .into_iter()
        .map(|acc| Account::new(acc.key, acc.a.b.unwrap_or_default(), acc.a.e.unwrap_or_default()))
        .collect())
}

/// Normalize every record of an array response.
pub fn normalize_records(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(records) => Ok(records.into_iter().map(normalize).collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::BrokerApi(format!(
            "Expected a list of records, got: {}",
            other.to_string().chars().take(200).collect::<String>()
        ))),
    }
}

/// Extract the total account value from a `GetAccountSecurities` response.
pub fn balance_from_securities(payload: Value) -> Result<Decimal> {
    let securities = normalize_as(payload, Some(ResponseType::SecuritiesData));
    let totals = securities
        .get("Totals")
        .cloned()
        .ok_or_else(|| Error::BrokerApi("Securities response has no totals".to_string()))?;
    let totals = normalize_as(totals, Some(ResponseType::SecuritiesTotalType));

    let total_value = totals
        .get("TotalValue")
        .cloned()
        .ok_or_else(|| Error::BrokerApi("Securities totals have no total value".to_string()))?;

    Ok(serde_json::from_value(total_value)?)
}

/// Extract the bearer token from an `Auth/Authenticate` response.
pub fn token_from_auth_result(payload: Value) -> Result<String> {
    let auth = normalize_as(payload, Some(ResponseType::AuthResult));
    auth.get("Token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Authentication("No token in authentication response".to_string()))
}
