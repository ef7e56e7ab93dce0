//! Telegram bot for the WOG fuel station directory.
//!
//! Relays `/stations` and `/station` commands to the public directory API
//! and answers with plain-text listings and station details.

pub mod bot;
pub mod chunk;
pub mod config;
pub mod directory;
pub mod filter;
pub mod format;
pub mod logging;
pub mod telegram;

#[cfg(test)]
mod test_support;
