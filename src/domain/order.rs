use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PlanId;

pub type OrderId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        })
    }
}

/// A durable record of one purchase attempt for one plan.
///
/// `plan_name` and `amount` are frozen when the order is created, so later
/// plan edits or deletion never change what the buyer was charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub plan_id: PlanId,
    pub plan_name: String,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub utr: String,
    pub amount: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Params for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub utr: String,
    pub amount: u64,
}

/// Buyer-supplied details for the manual payment flow.
#[derive(Debug, Clone, Default)]
pub struct PaymentSubmission {
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub utr: String,
}

impl PaymentSubmission {
    pub fn new(utr: impl Into<String>) -> Self {
        Self { utr: utr.into(), ..Self::default() }
    }

    pub fn with_buyer(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.buyer_name = Some(name.into());
        self.buyer_email = Some(email.into());
        self
    }
}
