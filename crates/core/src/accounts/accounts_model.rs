//! Account domain models.

use serde::{Deserialize, Serialize};

/// A brokerage account listed under the Spark user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The account key for API usage (`ACC_XXX-YYYYYY`)
    pub key: String,
    /// The account number (`YYYYYY`)
    pub number: String,
    /// The name listed on the account
    pub name: String,
}

impl Account {
    pub fn new(key: impl Into<String>, number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            number: number.into(),
            name: name.into(),
        }
    }
}

/// Convert an account key (`ACC_XXX-YYYYYY`) to the account number (`YYYYYY`).
///
/// Returns `None` when the key has no `-` separator.
pub fn account_key_to_number(key: &str) -> Option<&str> {
    key.split('-').nth(1)
}
