//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use sparksync_core::notifier::{MessageRef, Notifier};

use crate::errors::NotifyError;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Telegram rejects longer message texts.
const MAX_MESSAGE_CHARS: usize = 4096;
const TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct EditMessageRequest<'a> {
    chat_id: &'a str,
    message_id: i64,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Sends status messages to a single chat through a bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_key: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: TELEGRAM_API_URL.to_string(),
            api_key: api_key.into(),
            chat_id: chat_id.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.api_key, method)
    }

    async fn call<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<Option<T>, NotifyError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        let text = response.text().await?;
        let parsed: ApiResponse<T> = serde_json::from_str(&text)?;

        if !parsed.ok {
            return Err(NotifyError::Api(
                parsed
                    .description
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            ));
        }
        Ok(parsed.result)
    }

    async fn send_message(&self, text: &str) -> Result<Option<MessageRef>, NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: truncate(text),
        };
        let sent: Option<SentMessage> = self.call("sendMessage", &request).await?;
        Ok(sent.map(|m| MessageRef {
            chat_id: self.chat_id.clone(),
            message_id: m.message_id,
        }))
    }

    async fn edit_message_text(&self, message: &MessageRef, text: &str) -> Result<(), NotifyError> {
        let request = EditMessageRequest {
            chat_id: &message.chat_id,
            message_id: message.message_id,
            text: truncate(text),
        };
        let _: Option<serde_json::Value> = self.call("editMessageText", &request).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Option<MessageRef> {
        debug!("{}", text);
        match self.send_message(text).await {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to send Telegram message: {}", e);
                None
            }
        }
    }

    async fn edit_message(&self, message: Option<&MessageRef>, text: &str) {
        debug!("{}", text);
        let Some(message) = message else {
            return;
        };
        if let Err(e) = self.edit_message_text(message, text).await {
            warn!("Failed to edit Telegram message {}: {}", message.message_id, e);
        }
    }
}
