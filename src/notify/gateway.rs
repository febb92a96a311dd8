use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Owner-facing channel for new-payment events.
///
/// Best-effort: implementations report failure through the return value and
/// never propagate an error to the caller.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, text: &str) -> bool;
}

/// Pushes messages to a Telegram chat through the Bot API.
#[derive(Clone)]
pub struct TelegramGateway {
    client: Client,
    token: String,
    chat_id: String,
    api_url: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramGateway {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new(token: String, chat_id: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token,
            chat_id,
            api_url: "https://api.telegram.org".to_string(),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Posts one message. Errors never carry the request URL, which holds
    /// the bot token.
    async fn deliver(&self, text: &str) -> Result<(), String> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let payload = SendMessage { chat_id: &self.chat_id, text };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.map_err(|e| e.without_url().to_string())?;
        Err(format!("Telegram rejected notification ({status}): {body}"))
    }
}

#[async_trait]
impl NotificationGateway for TelegramGateway {
    #[instrument(name = "telegram_send", skip(self, text))]
    async fn send(&self, text: &str) -> bool {
        match self.deliver(text).await {
            Ok(()) => {
                debug!("Owner notification delivered");
                true
            }
            Err(e) => {
                error!(error = %e, "Telegram notify failed");
                false
            }
        }
    }
}

/// Stand-in used when no owner channel is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl NotificationGateway for DisabledGateway {
    async fn send(&self, _text: &str) -> bool {
        warn!("Telegram credentials not set; skipping notify");
        false
    }
}
