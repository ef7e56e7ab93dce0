//! Outbound message seam.

use async_trait::async_trait;

use crate::telegram::{TelegramClient, TelegramError};

/// Somewhere replies can be sent.
///
/// Implemented by [`TelegramClient`]; tests substitute a recorder.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send one plain-text message to a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl ReplySink for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.send_message(chat_id, text).await.map(|_| ())
    }
}
