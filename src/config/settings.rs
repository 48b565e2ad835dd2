//! Credentials and runtime settings.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_ENDPOINT, DEFAULT_RETRY_PERIOD_SECS, DEFAULT_TELEGRAM_API_URL};

/// Names of the required environment variables, in reporting order.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Credentials required for the bot to run.
///
/// All three values are opaque strings supplied from the environment.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the Practicum API.
    pub practicum_token: String,

    /// Telegram bot token.
    pub telegram_token: String,

    /// Chat that receives the status messages.
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Creates credentials from environment variables.
    ///
    /// Expects `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` to be set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTokens`] naming every variable that is
    /// unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates credentials using the given variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let [practicum_token, telegram_token, telegram_chat_id] =
            REQUIRED_VARS.map(|name| lookup(name).filter(|v| !v.trim().is_empty()));

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            (practicum_token, telegram_token, telegram_chat_id) => {
                let present = [
                    practicum_token.is_some(),
                    telegram_token.is_some(),
                    telegram_chat_id.is_some(),
                ];
                let missing = REQUIRED_VARS
                    .into_iter()
                    .zip(present)
                    .filter_map(|(name, present)| (!present).then_some(name))
                    .collect();
                Err(ConfigError::MissingTokens(missing))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Practicum homework statuses endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Telegram Bot API base URL.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Delay between polling cycles in seconds.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,

    /// Timeout for a single HTTP request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Optional file that receives a copy of the log.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_owned()
}

fn default_retry_period() -> u64 {
    DEFAULT_RETRY_PERIOD_SECS
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_secs: default_retry_period(),
            request_timeout_secs: default_request_timeout(),
            log_file: None,
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup_with_defaults(|name| std::env::var(name).ok())
    }

    /// Creates bot settings using the given variable lookup, falling back to
    /// defaults for absent, unparsable or zero values.
    #[must_use]
    pub fn from_lookup_with_defaults<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            endpoint: non_empty("PRACTICUM_ENDPOINT").unwrap_or_else(default_endpoint),
            telegram_api_url: non_empty("TELEGRAM_API_URL")
                .unwrap_or_else(default_telegram_api_url),
            retry_period_secs: non_empty("RETRY_PERIOD")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or_else(default_retry_period),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or_else(default_request_timeout),
            log_file: non_empty("LOG_FILE").map(PathBuf::from),
        }
    }

    /// Delay between polling cycles.
    #[must_use]
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    /// Timeout for a single HTTP request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),
}
