//! Process configuration.
//!
//! The only setting read from the environment is the bot token.

use std::fmt;

/// Environment variable holding the Telegram bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Token variable unset or blank
    #[error("{} is not set", TOKEN_ENV)]
    MissingToken,

    /// Token present but unusable in a request path
    #[error("invalid bot token: {reason}")]
    InvalidToken { reason: &'static str },
}

/// Startup configuration for the bot.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token.
    pub token: String,
}

impl BotConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_token(std::env::var(TOKEN_ENV).ok())
    }

    /// Validate a raw token value.
    ///
    /// Surrounding whitespace is trimmed. The token is embedded in request
    /// paths, so it must not contain `/` or inner whitespace.
    pub fn from_token(raw: Option<String>) -> Result<Self, ConfigError> {
        let token = raw
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        if token.contains('/') {
            return Err(ConfigError::InvalidToken {
                reason: "must not contain '/'",
            });
        }
        if token.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidToken {
                reason: "must not contain whitespace",
            });
        }

        Ok(Self {
            token: token.to_string(),
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}
