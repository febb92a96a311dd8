//! Configuration loaded from environment variables with sensible defaults.
//!
//! Channel credentials are optional: a channel without them is disabled and
//! the system still starts.

use std::env;
use std::time::Duration;

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub telegram: Option<TelegramConfig>,
    pub smtp: Option<SmtpConfig>,
    /// Base URL used to build admin links in owner notifications.
    pub public_base_url: Option<String>,
    pub notify_timeout: Duration,
    pub actor_buffer_size: usize,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: None,
            smtp: None,
            public_base_url: None,
            notify_timeout: Duration::from_secs(8),
            actor_buffer_size: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    /// Numeric settings that are present but not numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let telegram = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        let smtp = match (get("SMTP_HOST"), get("SMTP_USER"), get("SMTP_PASS")) {
            (Some(host), Some(username), Some(password)) => Some(SmtpConfig {
                port: parse_var("SMTP_PORT", get("SMTP_PORT"), 587)?,
                from: get("EMAIL_FROM").unwrap_or_else(|| username.clone()),
                host,
                username,
                password,
            }),
            _ => None,
        };

        let public_base_url = get("PUBLIC_BASE_URL")
            .or_else(|| get("YOUR_DOMAIN"))
            .map(|url| url.trim_end_matches('/').to_string());

        Ok(Self {
            telegram,
            smtp,
            public_base_url,
            notify_timeout: Duration::from_secs(parse_var(
                "NOTIFY_TIMEOUT_SECS",
                get("NOTIFY_TIMEOUT_SECS"),
                defaults.notify_timeout.as_secs(),
            )?),
            actor_buffer_size: parse_var("ACTOR_BUFFER_SIZE", get("ACTOR_BUFFER_SIZE"), defaults.actor_buffer_size)?
                .max(1),
            log_filter: get("LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
