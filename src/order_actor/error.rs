use thiserror::Error;

use crate::domain::{OrderId, PlanId};

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),
    #[error("Order references unknown plan: {0}")]
    PlanNotFound(PlanId),
    #[error("Invalid order transition: {0}")]
    InvalidTransition(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
