use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderId, OrderStatus};
use super::actions::{ApprovalOutcome, OrderAction, OrderActionResult};

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders change only through actions
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    /// Creates a new pending Order.
    ///
    /// # Notes
    /// `amount` is taken as given; it is the caller's snapshot of the plan
    /// price and is never recomputed.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            plan_id: params.plan_id,
            plan_name: params.plan_name,
            buyer_name: params.buyer_name,
            buyer_email: params.buyer_email,
            utr: params.utr,
            amount: params.amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    /// Orders are an audit trail.
    fn on_delete(&self) -> Result<(), String> {
        Err(format!("order {} cannot be deleted", self.id))
    }

    /// Runs a status transition.
    ///
    /// # Errors
    /// Approving a rejected order, or rejecting an approved one.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match (action, self.status) {
            (OrderAction::Approve, OrderStatus::Pending) => {
                self.status = OrderStatus::Approved;
                self.approved_at = Some(Utc::now());
                Ok(OrderActionResult::Approve(ApprovalOutcome { order: self.clone(), transitioned: true }))
            }
            (OrderAction::Approve, OrderStatus::Approved) => {
                Ok(OrderActionResult::Approve(ApprovalOutcome { order: self.clone(), transitioned: false }))
            }
            (OrderAction::Reject, OrderStatus::Pending) => {
                self.status = OrderStatus::Rejected;
                Ok(OrderActionResult::Reject(self.clone()))
            }
            (OrderAction::Reject, OrderStatus::Rejected) => Ok(OrderActionResult::Reject(self.clone())),
            (action, status) => Err(format!("cannot {action:?} order {} in status {status}", self.id)),
        }
    }
}
