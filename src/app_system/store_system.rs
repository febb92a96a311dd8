use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::AppConfig;
use crate::actor_framework::ResourceActor;
use crate::cart::{MemorySessionStore, SessionStore};
use crate::clients::{OrderLedger, PlanCatalog};
use crate::domain::{Order, Plan};
use crate::notify::{
    DisabledGateway, DisabledNotifier, FulfillmentNotifier, NotificationGateway, SmtpFulfillmentNotifier,
    TelegramGateway,
};
use crate::reconcile::{NotifySettings, ReconciliationService};

fn sequential_ids() -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || counter.fetch_add(1, Ordering::SeqCst)
}

/// The running storefront engine.
///
/// Responsible for starting the catalog and ledger actors, wiring the
/// outbound channels from config, and handling shutdown.
pub struct StoreSystem {
    pub service: ReconciliationService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Starts the actors with channels built from `config`.
    pub fn start(config: &AppConfig) -> Self {
        Self::start_with(config, Arc::new(MemorySessionStore::new()), gateway(config), fulfillment(config))
    }

    /// Starts the actors with explicitly supplied collaborators.
    pub fn start_with(
        config: &AppConfig,
        sessions: Arc<dyn SessionStore>,
        gateway: Arc<dyn NotificationGateway>,
        fulfillment: Arc<dyn FulfillmentNotifier>,
    ) -> Self {
        info!("Starting store system");

        let (plan_actor, plan_client) = ResourceActor::<Plan>::new("plans", config.actor_buffer_size, sequential_ids());
        let plan_catalog = PlanCatalog::new(plan_client);
        let plan_handle = tokio::spawn(plan_actor.run());

        let (order_actor, order_client) =
            ResourceActor::<Order>::new("orders", config.actor_buffer_size, sequential_ids());
        let order_ledger = OrderLedger::new(order_client, plan_catalog.clone());
        let order_handle = tokio::spawn(order_actor.run());

        let settings = NotifySettings {
            timeout: config.notify_timeout,
            public_base_url: config.public_base_url.clone(),
        };
        let service = ReconciliationService::new(plan_catalog, order_ledger, sessions, gateway, fulfillment, settings);

        Self { service, handles: vec![plan_handle, order_handle] }
    }

    /// Drops every client and waits for the actors to drain.
    ///
    /// Clones of the service held elsewhere keep the actors alive, so all of
    /// them must be dropped before this returns.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn gateway(config: &AppConfig) -> Arc<dyn NotificationGateway> {
    let Some(telegram) = &config.telegram else {
        warn!("Telegram not configured; owner notifications disabled");
        return Arc::new(DisabledGateway);
    };
    match TelegramGateway::new(telegram.bot_token.clone(), telegram.chat_id.clone(), config.notify_timeout) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            error!(error = %e, "Failed to build Telegram client; owner notifications disabled");
            Arc::new(DisabledGateway)
        }
    }
}

fn fulfillment(config: &AppConfig) -> Arc<dyn FulfillmentNotifier> {
    let Some(smtp) = &config.smtp else {
        warn!("SMTP not configured; fulfillment emails disabled");
        return Arc::new(DisabledNotifier);
    };
    match SmtpFulfillmentNotifier::new(
        &smtp.host,
        smtp.port,
        smtp.username.clone(),
        smtp.password.clone(),
        smtp.from.clone(),
        config.notify_timeout,
    ) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            error!(error = %e, "Failed to build SMTP transport; fulfillment emails disabled");
            Arc::new(DisabledNotifier)
        }
    }
}
