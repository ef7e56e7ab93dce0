//! Long-polling loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::telegram::TelegramClient;

use super::handlers::Bot;
use super::sink::ReplySink;

/// Pause after a failed `getUpdates` before polling again.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll Telegram for updates until `shutdown` resolves.
///
/// Every update is handled on its own task, so a slow directory call only
/// delays the reply it belongs to. Handlers still running at shutdown are
/// awaited before returning.
pub async fn run_polling<S, F>(telegram: TelegramClient, bot: Arc<Bot<S>>, shutdown: F)
where
    S: ReplySink + 'static,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut offset: Option<i64> = None;
    let mut in_flight = JoinSet::new();

    info!("polling for updates");

    loop {
        let polled = tokio::select! {
            _ = &mut shutdown => break,
            polled = telegram.get_updates(offset) => polled,
        };

        // Reap finished handlers so the set doesn't grow without bound.
        while in_flight.try_join_next().is_some() {}

        match polled {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let bot = Arc::clone(&bot);
                    in_flight.spawn(async move { bot.handle_update(update).await });
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to poll updates, retrying in {}s", POLL_RETRY_DELAY.as_secs());
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                }
            }
        }
    }

    info!(pending = in_flight.len(), "shutting down, waiting for in-flight commands");
    while in_flight.join_next().await.is_some() {}
}
