use thiserror::Error;

use crate::domain::PlanId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Plan not found: {0}")]
    NotFound(PlanId),
    #[error("Invalid plan input: {0}")]
    InvalidInput(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
