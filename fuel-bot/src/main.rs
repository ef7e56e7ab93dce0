use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use fuel_bot::bot::{Bot, messages, run_polling};
use fuel_bot::config::BotConfig;
use fuel_bot::directory::{DirectoryClient, DirectoryConfig};
use fuel_bot::logging;
use fuel_bot::telegram::{TelegramClient, TelegramConfig};
use tracing::{error, info, info_span, warn};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = BotConfig::from_env()?;

    let directory = DirectoryClient::new(DirectoryConfig::new().with_span(info_span!("directory")))?;
    let telegram = TelegramClient::new(TelegramConfig::new(&config.token))?;

    // Fail fast on a bad token.
    let me = telegram.get_me().await?;
    info!(id = me.id, username = me.username.as_deref(), "authorized as bot");

    if let Err(e) = telegram.set_my_commands(&messages::command_menu()).await {
        warn!(error = %e, "failed to publish command menu");
    }

    let mut bot = Bot::new(directory, telegram.clone());
    if let Some(username) = me.username {
        bot = bot.with_username(username);
    }

    run_polling(telegram, Arc::new(bot), shutdown_signal()).await;

    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received");
}
