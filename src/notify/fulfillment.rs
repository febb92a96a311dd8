use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::messages::fulfillment_email;
use crate::domain::{Order, Plan};

/// Buyer-facing delivery message sent after approval.
///
/// `plan` is `None` when the plan was deleted after the order was placed.
#[async_trait]
pub trait FulfillmentNotifier: Send + Sync {
    async fn send(&self, order: &Order, plan: Option<&Plan>) -> bool;
}

/// Sends the fulfillment email over SMTP with STARTTLS.
#[derive(Clone)]
pub struct SmtpFulfillmentNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpFulfillmentNotifier {
    /// # Errors
    /// Fails if the relay host cannot be resolved into a TLS transport.
    pub fn new(
        host: &str,
        port: u16,
        username: String,
        password: String,
        from: String,
        timeout: Duration,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(timeout))
            .build();
        Ok(Self::with_transport(transport, from))
    }

    pub fn with_transport(transport: AsyncSmtpTransport<Tokio1Executor>, from: String) -> Self {
        Self { transport, from }
    }

    fn build_message(&self, to: &str, order: &Order, plan: Option<&Plan>) -> Result<Message, String> {
        let email = fulfillment_email(order, plan);
        Message::builder()
            .from(self.from.parse().map_err(|e| format!("Invalid from address: {e}"))?)
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)
            .map_err(|e| format!("Failed to build email: {e}"))
    }
}

#[async_trait]
impl FulfillmentNotifier for SmtpFulfillmentNotifier {
    #[instrument(name = "fulfillment_send", skip(self, order, plan), fields(order_id = order.id))]
    async fn send(&self, order: &Order, plan: Option<&Plan>) -> bool {
        let Some(to) = order.buyer_email.as_deref().filter(|e| !e.is_empty()) else {
            warn!("Order has no buyer email; nothing to send");
            return false;
        };

        let message = match self.build_message(to, order, plan) {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, "Failed to prepare email");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                info!("Fulfillment email sent");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to send email");
                false
            }
        }
    }
}

/// Stand-in used when SMTP is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl FulfillmentNotifier for DisabledNotifier {
    async fn send(&self, order: &Order, _plan: Option<&Plan>) -> bool {
        warn!(order_id = order.id, "SMTP not configured; cannot send email");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use chrono::Utc;

    fn order(email: Option<&str>) -> Order {
        Order {
            id: 3,
            plan_id: 2,
            plan_name: "Amazon Prime Video".into(),
            buyer_name: Some("Meera".into()),
            buyer_email: email.map(str::to_string),
            utr: "UTR55".into(),
            amount: 149,
            status: OrderStatus::Approved,
            created_at: Utc::now(),
            approved_at: Some(Utc::now()),
        }
    }

    fn notifier() -> SmtpFulfillmentNotifier {
        SmtpFulfillmentNotifier::with_transport(
            AsyncSmtpTransport::<Tokio1Executor>::unencrypted_localhost(),
            "OTT Store <store@example.com>".into(),
        )
    }

    #[tokio::test]
    async fn test_message_is_addressed_to_the_buyer() {
        let message = notifier().build_message("meera@example.com", &order(None), None).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();
        assert!(formatted.contains("To: meera@example.com"));
        assert_eq!(message.envelope().to().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected() {
        assert!(notifier().build_message("not an address", &order(None), None).is_err());
    }

    #[tokio::test]
    async fn test_missing_buyer_email_is_not_sent() {
        assert!(!notifier().send(&order(None), None).await);
        assert!(!DisabledNotifier.send(&order(Some("a@b.c")), None).await);
    }
}
