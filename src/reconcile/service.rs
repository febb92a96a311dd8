use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::ReconcileError;
use crate::cart::{CartStore, SessionId, SessionStore};
use crate::clients::{OrderLedger, PlanCatalog};
use crate::domain::{Order, OrderId, PaymentSubmission, Plan, PlanId};
use crate::notify::{payment_submitted, FulfillmentNotifier, NotificationGateway};
use crate::order_actor::LedgerError;
use crate::plan_actor::CatalogError;

/// Bounds and links used when talking to the outbound channels.
#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub timeout: Duration,
    pub public_base_url: Option<String>,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(8), public_base_url: None }
    }
}

/// Result of a successful simulated card checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub plans: Vec<Plan>,
    pub total: u64,
}

/// What an approval request did.
///
/// The side-effect flags are only ever true on the call that transitioned
/// the order.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalReport {
    pub order: Order,
    pub transitioned: bool,
    pub stock_decremented: bool,
    pub fulfillment_sent: bool,
}

/// Turns carts into orders and drives order approval.
///
/// Durable state changes always complete before any outbound message is
/// attempted, and a failed message never unwinds them.
#[derive(Clone)]
pub struct ReconciliationService {
    catalog: PlanCatalog,
    ledger: OrderLedger,
    sessions: Arc<dyn SessionStore>,
    gateway: Arc<dyn NotificationGateway>,
    fulfillment: Arc<dyn FulfillmentNotifier>,
    settings: NotifySettings,
}

fn ledger_error(e: LedgerError) -> ReconcileError {
    match e {
        LedgerError::NotFound(id) => ReconcileError::OrderNotFound(id),
        LedgerError::PlanNotFound(id) => ReconcileError::PlanNotFound(id),
        other => ReconcileError::Ledger(other),
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ReconciliationService {
    pub fn new(
        catalog: PlanCatalog,
        ledger: OrderLedger,
        sessions: Arc<dyn SessionStore>,
        gateway: Arc<dyn NotificationGateway>,
        fulfillment: Arc<dyn FulfillmentNotifier>,
        settings: NotifySettings,
    ) -> Self {
        Self { catalog, ledger, sessions, gateway, fulfillment, settings }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn cart(&self, session: SessionId) -> CartStore {
        CartStore::new(session, self.sessions.clone(), self.catalog.clone())
    }

    /// Simulated card payment for the whole cart.
    ///
    /// Every stored item is checked for stock before any is taken; an item
    /// whose plan was deleted counts as out of stock. If another buyer wins a
    /// race between the two passes the units already taken stay taken and
    /// `PartialStockFailure` tells the caller which items missed; the cart is
    /// left as it was.
    #[instrument(skip(self, session), fields(session = %session))]
    pub async fn checkout_card(&self, session: SessionId) -> Result<CheckoutReceipt, ReconcileError> {
        let cart = self.cart(session);
        let plan_ids = cart.plan_ids().await?;
        if plan_ids.is_empty() {
            return Err(ReconcileError::EmptyCart);
        }

        for &plan_id in &plan_ids {
            let available = match self.catalog.stock(plan_id).await {
                Ok(level) => level,
                Err(CatalogError::NotFound(_)) => 0,
                Err(e) => return Err(e.into()),
            };
            if available == 0 {
                info!(plan_id, "Checkout blocked by out-of-stock item");
                return Err(ReconcileError::OutOfStock(plan_id));
            }
        }

        let mut decremented = Vec::new();
        let mut failed = Vec::new();
        for &plan_id in &plan_ids {
            match self.catalog.try_decrement(plan_id).await {
                Ok(true) => decremented.push(plan_id),
                Ok(false) => failed.push(plan_id),
                Err(e) => {
                    error!(plan_id, error = %e, "Stock decrement failed");
                    failed.push(plan_id);
                }
            }
        }

        if !failed.is_empty() {
            warn!(?decremented, ?failed, "Lost stock race during checkout");
            return Err(ReconcileError::PartialStockFailure { decremented, failed });
        }

        let snapshot = cart.snapshot().await?;
        cart.clear().await?;
        info!(items = snapshot.plans.len(), total = snapshot.total, "Checkout successful");
        Ok(CheckoutReceipt { plans: snapshot.plans, total: snapshot.total })
    }

    /// Manual payment for the whole cart: one pending order per item, each
    /// at that item's current price. Stock is untouched until approval.
    #[instrument(skip(self, session, payment), fields(session = %session))]
    pub async fn submit_cart_payment(
        &self,
        session: SessionId,
        payment: PaymentSubmission,
    ) -> Result<Vec<Order>, ReconcileError> {
        let payment = Self::validate(payment)?;
        let cart = self.cart(session);
        let snapshot = cart.snapshot().await?;

        let mut orders = Vec::with_capacity(snapshot.plans.len());
        for plan in &snapshot.plans {
            let created = self
                .ledger
                .create(
                    plan.id,
                    payment.buyer_name.clone(),
                    payment.buyer_email.clone(),
                    payment.utr.clone(),
                    plan.price,
                )
                .await;
            match created {
                Ok(order) => orders.push(order),
                Err(LedgerError::PlanNotFound(id)) => debug!(plan_id = id, "Plan deleted before order creation"),
                Err(e) => return Err(ledger_error(e)),
            }
        }

        let Some(first) = orders.first() else {
            return Err(ReconcileError::EmptyCart);
        };
        self.notify_owner(first).await;

        cart.clear().await?;
        info!(orders = orders.len(), "Payment reference submitted for cart");
        Ok(orders)
    }

    /// Manual payment for a single plan.
    #[instrument(skip(self, payment))]
    pub async fn submit_plan_payment(
        &self,
        plan_id: PlanId,
        payment: PaymentSubmission,
    ) -> Result<Order, ReconcileError> {
        let payment = Self::validate(payment)?;
        let plan = match self.catalog.get(plan_id).await {
            Ok(plan) => plan,
            Err(CatalogError::NotFound(id)) => return Err(ReconcileError::PlanNotFound(id)),
            Err(e) => return Err(e.into()),
        };

        let order = self
            .ledger
            .create(plan.id, payment.buyer_name, payment.buyer_email, payment.utr, plan.price)
            .await
            .map_err(ledger_error)?;

        self.notify_owner(&order).await;
        info!(order_id = order.id, "Payment reference submitted");
        Ok(order)
    }

    /// Approves an order and, on the first approval only, takes one unit of
    /// stock and emails the buyer.
    ///
    /// Neither side effect can revert the approval. A failed decrement means
    /// the manual flow sold a unit the catalog no longer had.
    #[instrument(skip(self))]
    pub async fn approve(&self, order_id: OrderId) -> Result<ApprovalReport, ReconcileError> {
        let outcome = self.ledger.approve(order_id).await.map_err(ledger_error)?;
        if !outcome.transitioned {
            info!("Order already approved; nothing to do");
            return Ok(ApprovalReport {
                order: outcome.order,
                transitioned: false,
                stock_decremented: false,
                fulfillment_sent: false,
            });
        }

        let order = outcome.order;
        let stock_decremented = match self.catalog.try_decrement(order.plan_id).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(plan_id = order.plan_id, "Approved order with no stock left; plan is oversold");
                false
            }
            Err(e) => {
                warn!(plan_id = order.plan_id, error = %e, "Could not take stock for approved order");
                false
            }
        };

        let plan = match self.catalog.get(order.plan_id).await {
            Ok(plan) => Some(plan),
            Err(e) => {
                debug!(error = %e, "Plan unavailable, using order snapshot");
                None
            }
        };
        let fulfillment_sent = self
            .bounded("fulfillment", self.fulfillment.send(&order, plan.as_ref()))
            .await;

        info!(stock_decremented, fulfillment_sent, "Order approved");
        Ok(ApprovalReport { order, transitioned: true, stock_decremented, fulfillment_sent })
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, order_id: OrderId) -> Result<Order, ReconcileError> {
        let order = self.ledger.reject(order_id).await.map_err(ledger_error)?;
        info!("Order rejected");
        Ok(order)
    }

    fn validate(payment: PaymentSubmission) -> Result<PaymentSubmission, ReconcileError> {
        let utr = payment.utr.trim().to_string();
        if utr.is_empty() {
            return Err(ReconcileError::InvalidInput("payment reference (UTR) is required".into()));
        }
        Ok(PaymentSubmission {
            buyer_name: clean(payment.buyer_name),
            buyer_email: clean(payment.buyer_email),
            utr,
        })
    }

    async fn notify_owner(&self, order: &Order) -> bool {
        let text = payment_submitted(order, self.settings.public_base_url.as_deref());
        self.bounded("owner notification", self.gateway.send(&text)).await
    }

    async fn bounded(&self, channel: &'static str, send: impl Future<Output = bool>) -> bool {
        match tokio::time::timeout(self.settings.timeout, send).await {
            Ok(delivered) => {
                if !delivered {
                    warn!(channel, "Delivery failed");
                }
                delivered
            }
            Err(_) => {
                warn!(channel, timeout = ?self.settings.timeout, "Delivery timed out");
                false
            }
        }
    }
}
