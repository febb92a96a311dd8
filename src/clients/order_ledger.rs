use tracing::{debug, error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::PlanCatalog;
use crate::domain::{Order, OrderCreate, OrderId, OrderStatus, PlanId};
use crate::order_actor::{ApprovalOutcome, LedgerError, OrderAction, OrderActionResult};
use crate::plan_actor::CatalogError;

/// Client for the order ledger.
///
/// Validates the referenced plan before recording an order, and runs the
/// approval state machine inside the ledger actor.
#[derive(Clone)]
pub struct OrderLedger {
    inner: ResourceClient<Order>,
    plan_catalog: PlanCatalog,
}

impl_client_get!(OrderLedger, Order, LedgerError);

fn ledger_error(id: OrderId) -> impl FnOnce(FrameworkError) -> LedgerError {
    move |e| match e {
        FrameworkError::NotFound(_) => LedgerError::NotFound(id),
        FrameworkError::Rejected(reason) => LedgerError::InvalidTransition(reason),
        other => LedgerError::ActorCommunicationError(other.to_string()),
    }
}

impl OrderLedger {
    pub fn new(inner: ResourceClient<Order>, plan_catalog: PlanCatalog) -> Self {
        Self { inner, plan_catalog }
    }

    /// Records a pending order for `plan_id`.
    ///
    /// `amount` is the caller's price snapshot and is stored as given.
    #[instrument(skip(self, buyer_name, buyer_email, utr))]
    pub async fn create(
        &self,
        plan_id: PlanId,
        buyer_name: Option<String>,
        buyer_email: Option<String>,
        utr: String,
        amount: u64,
    ) -> Result<Order, LedgerError> {
        info!("Processing create_order request");

        let plan = match self.plan_catalog.get(plan_id).await {
            Ok(plan) => plan,
            Err(CatalogError::NotFound(_)) => {
                error!("Plan not found");
                return Err(LedgerError::PlanNotFound(plan_id));
            }
            Err(e) => {
                error!(error = %e, "Plan validation failed");
                return Err(LedgerError::ActorCommunicationError(e.to_string()));
            }
        };

        let params = OrderCreate {
            plan_id,
            plan_name: plan.name,
            buyer_name,
            buyer_email,
            utr,
            amount,
        };
        let id = self
            .inner
            .create(params)
            .await
            .map_err(|e| LedgerError::ActorCommunicationError(e.to_string()))?;

        info!(order_id = id, "Order recorded");
        self.get(id).await
    }

    /// Orders newest first, optionally restricted to one status.
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, LedgerError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .list()
            .await
            .map_err(|e| LedgerError::ActorCommunicationError(e.to_string()))?;
        orders.retain(|o| status.map_or(true, |s| o.status == s));
        orders.reverse();
        Ok(orders)
    }

    /// Moves a pending order to approved.
    ///
    /// Calling this on an approved order returns it unchanged with
    /// `transitioned == false`.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: OrderId) -> Result<ApprovalOutcome, LedgerError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::Approve).await.map_err(ledger_error(id))? {
            OrderActionResult::Approve(outcome) => Ok(outcome),
            other => Err(LedgerError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, id: OrderId) -> Result<Order, LedgerError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::Reject).await.map_err(ledger_error(id))? {
            OrderActionResult::Reject(order) => Ok(order),
            other => Err(LedgerError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
        }
    }
}
