//! Telegram Bot API HTTP client.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::TelegramError;
use super::types::{
    ApiResponse, BotCommand, GetUpdatesParams, Message, NoParams, SendMessageParams,
    SetMyCommandsParams, Update, User,
};

/// Default base URL for the Bot API.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Default long-polling timeout.
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Headroom on top of the poll timeout before the HTTP request gives up.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Update kinds the bot subscribes to.
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Configuration for the Telegram client.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub token: String,
    /// Base URL for the API
    pub base_url: String,
    /// Long-polling timeout in seconds
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// Create a new config with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the long-polling timeout.
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{base_url}/bot{token}`; never logged.
    endpoint: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Create a new Telegram client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                config.poll_timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS,
            ))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/bot{}",
                config.base_url.trim_end_matches('/'),
                config.token
            ),
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    /// Identify the bot account behind the token.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &NoParams {}).await
    }

    /// Long-poll for updates after `offset`.
    ///
    /// Returns an empty list when the poll timeout elapses without updates.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }

    /// Send a plain-text message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.call("sendMessage", &SendMessageParams { chat_id, text })
            .await
    }

    /// Publish the command menu shown by Telegram clients.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<bool, TelegramError> {
        self.call("setMyCommands", &SetMyCommandsParams { commands })
            .await
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(method, "telegram request");

        let response = self
            .http
            .post(format!("{}/{method}", self.endpoint))
            .json(params)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: ApiResponse<R> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::Api {
                    status: status.as_u16(),
                    description: body.chars().take(200).collect(),
                });
            }
            Err(e) => {
                return Err(TelegramError::Json {
                    message: e.to_string(),
                });
            }
        };

        if !parsed.ok {
            return Err(TelegramError::Api {
                status: parsed.error_code.unwrap_or(status.as_u16()),
                description: parsed.description.unwrap_or_default(),
            });
        }

        parsed.result.ok_or_else(|| TelegramError::Json {
            message: format!("{method}: response has no result"),
        })
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish_non_exhaustive()
    }
}
