//! Telegram client module.
//!
//! Delivers status messages to a single chat through the Bot API.

mod client;

pub use client::{MAX_MESSAGE_LENGTH, Notifier, TelegramBot, TelegramError};
