//! Telegram Bot API error types.

/// Errors from the Telegram HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// HTTP request failed (network error, timeout, etc.)
    ///
    /// The request URL is stripped before wrapping since it embeds the token.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// API answered with `"ok": false`
    #[error("API error {status}: {description}")]
    Api { status: u16, description: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err.without_url())
    }
}
