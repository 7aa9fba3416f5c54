//! Sheets-specific error types.
//!
//! These errors stay inside the storage layer and are converted to
//! `sparksync_core::Error::Storage` before being returned to callers.

use sparksync_core::errors::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign service account token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected Sheets response: {0}")]
    UnexpectedResponse(String),
}

impl From<SheetsError> for Error {
    fn from(err: SheetsError) -> Self {
        Error::Storage(err.to_string())
    }
}
