//! Google service account authentication.
//!
//! A signed RS256 assertion is exchanged for an OAuth access token, which is
//! cached until shortly before it expires.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::SheetsError;

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the cached token expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Decode a base64-encoded PEM private key. The first `"` is dropped, since
/// keys copied out of a JSON credentials file usually carry one.
pub fn decode_private_key(encoded: &str) -> Result<String, SheetsError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| SheetsError::InvalidKey(format!("not valid base64: {}", e)))?;
    let pem = String::from_utf8(bytes)
        .map_err(|e| SheetsError::InvalidKey(format!("not valid UTF-8: {}", e)))?;
    Ok(pem.replacen('"', "", 1))
}

/// Service account identity.
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key_pem: String,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("private_key_pem", &"***")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Issues and caches access tokens for a service account.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(credentials: ServiceAccountCredentials) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key_pem.as_bytes())
            .map_err(|e| SheetsError::InvalidKey(e.to_string()))?;
        Ok(Self {
            credentials,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    /// Signed assertion for the token exchange.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let claims = Claims {
            iss: &self.credentials.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: TOKEN_URL,
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?)
    }

    /// A valid access token, fetched anew only when the cached one is about
    /// to expire.
    pub async fn access_token(&self, client: &reqwest::Client) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now {
                return Ok(token.token.clone());
            }
        }

        debug!("Requesting access token for {}", self.credentials.client_email);
        let body = format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT),
            urlencoding::encode(&self.assertion(now)?)
        );

        let response = client
            .post(TOKEN_URL)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SheetsError::TokenExchange(format!(
                "HTTP {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&text)
            .map_err(|e| SheetsError::TokenExchange(format!("invalid token response: {}", e)))?;

        let expires_in = parsed.expires_in.unwrap_or(TOKEN_LIFETIME_SECS);
        *cached = Some(CachedToken {
            token: parsed.access_token.clone(),
            expires_at: now + Duration::seconds(expires_in),
        });

        Ok(parsed.access_token)
    }
}
