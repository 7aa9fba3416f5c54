//! HTTP client for the Spark (ordernet) brokerage API.
//!
//! A [`SparkClient`] is only obtainable through [`SparkClient::authenticate`],
//! so every request it sends carries a bearer token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use sparksync_core::accounts::Account;
use sparksync_core::errors::{Error, Result};

use crate::broker::models::{
    accounts_from_static_data, balance_from_securities, normalize_records, token_from_auth_result,
};
use crate::broker::{SparkApi, SparkConnector};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Spark API base URL of a broker (`meitav`, `psagot`, `nesua`, ...).
pub fn default_api_url(broker: &str) -> String {
    format!("https://spark{}.ordernet.co.il/api", broker)
}

#[derive(Serialize)]
struct AuthenticateRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authenticated Spark API session.
#[derive(Debug, Clone)]
pub struct SparkClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
}

impl SparkClient {
    /// Log in and return a token-scoped client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when the broker rejects the
    /// credentials or answers without a token.
    pub async fn authenticate(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        let url = format!("{}/Auth/Authenticate", base_url);
        info!("Logging in to {} with user {}", base_url, username);

        let response = client
            .post(&url)
            .json(&AuthenticateRequest { username, password })
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("Request failed: {}", e)))?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(Error::Authentication(format!(
                "Credentials rejected (HTTP {})",
                response.status()
            )));
        }

        let payload: Value = parse_response(response).await?;
        let token = token_from_auth_result(payload)?;

        let auth_header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Authentication(format!("Invalid token format: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    /// Make an authenticated GET request and return the JSON body.
    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("[Spark] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::BrokerApi(format!("Request failed: {}", e)))?;

        parse_response(response).await
    }
}

/// Parse an HTTP response body as JSON, mapping non-success statuses to errors.
async fn parse_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::BrokerApi(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(Error::BrokerApi(format!(
            "API error {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        Error::BrokerApi(format!(
            "Failed to parse response: {} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}

fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[async_trait]
impl SparkApi for SparkClient {
    async fn get_accounts(&self) -> Result<Vec<Account>> {
        let payload = self.get("DataProvider/GetStaticData").await?;
        accounts_from_static_data(payload)
    }

    async fn get_holdings(&self, account: &Account) -> Result<Vec<Value>> {
        let path = format!(
            "Account/GetHoldings?accountKey={}",
            urlencoding::encode(&account.key)
        );
        normalize_records(self.get(&path).await?)
    }

    async fn get_transactions(
        &self,
        account: &Account,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Value>> {
        let path = format!(
            "Account/GetAccountTransactions?accountKey={}&startDate={}&endDate={}",
            urlencoding::encode(&account.key),
            urlencoding::encode(&iso_timestamp(&from)),
            urlencoding::encode(&iso_timestamp(&to)),
        );
        normalize_records(self.get(&path).await?)
    }

    async fn get_account_balance(&self, account: &Account) -> Result<Decimal> {
        let path = format!(
            "Account/GetAccountSecurities?accountKey={}",
            urlencoding::encode(&account.key)
        );
        balance_from_securities(self.get(&path).await?)
    }
}

/// Credentials for opening a Spark session.
#[derive(Clone)]
pub struct SparkLogin {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SparkLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparkLogin")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl SparkConnector for SparkLogin {
    async fn connect(&self) -> Result<Arc<dyn SparkApi>> {
        let client =
            SparkClient::authenticate(&self.base_url, &self.username, &self.password, self.timeout)
                .await?;
        Ok(Arc::new(client))
    }
}
