//! Minimal Telegram Bot API client.
//!
//! Only the methods the bot needs: `getMe`, `getUpdates` (long polling),
//! `sendMessage` and `setMyCommands`.

mod client;
mod error;
mod types;

pub use client::{TelegramClient, TelegramConfig};
pub use error::TelegramError;
pub use types::{BotCommand, Chat, Message, Update, User};
