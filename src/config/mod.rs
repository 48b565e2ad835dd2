//! Configuration module for the homework status bot.
//!
//! Handles loading and validation of the required credentials
//! and the optional runtime settings.

mod settings;

pub use settings::{BotSettings, ConfigError, Credentials, REQUIRED_VARS};

/// Default Practicum homework statuses endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default delay between two polling cycles, in seconds.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
