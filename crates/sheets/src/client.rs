//! Google Sheets v4 REST client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use sparksync_core::errors::Result;
use sparksync_core::storage::{WorksheetBackend, WorksheetRow};

use crate::auth::ServiceAccountAuth;
use crate::errors::SheetsError;

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct SpreadsheetInfo {
    #[serde(default)]
    sheets: Vec<SheetInfo>,
}

#[derive(Debug, Deserialize)]
struct SheetInfo {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// A1 range covering every column of a worksheet.
fn full_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Render a cell as the string the sheet displays.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a values grid into header-keyed rows. The first row is the header.
fn rows_by_header(mut values: Vec<Vec<Value>>) -> Vec<WorksheetRow> {
    if values.is_empty() {
        return Vec::new();
    }
    let headers: Vec<String> = values.remove(0).iter().map(cell_text).collect();

    values
        .into_iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let cell = row.get(i).map(cell_text).unwrap_or_default();
                    (header.clone(), cell)
                })
                .collect::<HashMap<_, _>>()
        })
        .collect()
}

/// Spreadsheet client bound to one document.
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    auth: Option<ServiceAccountAuth>,
}

impl GoogleSheetsClient {
    /// Create a client for `spreadsheet_id`. Without `auth`, requests are sent
    /// anonymously, which only works for publicly editable documents.
    pub fn new(
        spreadsheet_id: impl Into<String>,
        auth: Option<ServiceAccountAuth>,
    ) -> std::result::Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        if auth.is_some() {
            info!("Using service account auth");
        }
        Ok(Self {
            client,
            base_url: DEFAULT_SHEETS_API_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            auth,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, self.spreadsheet_id, suffix)
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        self.url(&format!("/values/{}{}", urlencoding::encode(range), suffix))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, SheetsError> {
        let request = match &self.auth {
            Some(auth) => request.bearer_auth(auth.access_token(&self.client).await?),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            SheetsError::UnexpectedResponse(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    async fn sheet_titles(&self) -> std::result::Result<Vec<String>, SheetsError> {
        let request = self
            .client
            .get(self.url(""))
            .query(&[("fields", "sheets.properties.title")]);
        let info: SpreadsheetInfo = self.send(request).await?;
        Ok(info.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn add_sheet(&self, title: &str, headers: &[&str]) -> std::result::Result<(), SheetsError> {
        let body = json!({"requests": [{"addSheet": {"properties": {"title": title}}}]});
        let request = self.client.post(self.url(":batchUpdate")).json(&body);
        let _: Value = self.send(request).await?;

        let range = format!("{}!A1", full_range(title));
        let request = self
            .client
            .put(self.values_url(&range, ""))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [headers] }));
        let _: Value = self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl WorksheetBackend for GoogleSheetsClient {
    async fn ensure_worksheet(&self, title: &str, headers: &[&str]) -> Result<()> {
        let titles = self.sheet_titles().await?;
        if titles.iter().any(|t| t == title) {
            debug!("Worksheet {} exists", title);
            return Ok(());
        }

        info!("Creating new sheet {}", title);
        self.add_sheet(title, headers).await?;
        Ok(())
    }

    async fn get_rows(&self, title: &str) -> Result<Vec<WorksheetRow>> {
        let request = self.client.get(self.values_url(&full_range(title), ""));
        let range: ValueRange = self.send(request).await?;
        Ok(rows_by_header(range.values))
    }

    async fn add_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let count = rows.len();
        let request = self
            .client
            .post(self.values_url(&full_range(title), ":append"))
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": rows }));
        let _: Value = self.send(request).await?;
        debug!("Appended {} rows to {}", count, title);
        Ok(())
    }
}
