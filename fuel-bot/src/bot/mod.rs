//! Command router for the Telegram bot.
//!
//! Maps `/start`, `/stations [query]` and `/station <id>` onto directory
//! queries and sends the formatted replies back to the originating chat.

mod command;
mod handlers;
pub mod messages;
mod runner;
mod sink;

pub use command::Command;
pub use handlers::Bot;
pub use runner::run_polling;
pub use sink::ReplySink;
