use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Unexpected Telegram response: {0}")]
    UnexpectedResponse(#[from] serde_json::Error),
}

impl From<NotifyError> for sparksync_core::Error {
    fn from(err: NotifyError) -> Self {
        sparksync_core::Error::Notification(err.to_string())
    }
}
