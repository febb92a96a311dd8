use thiserror::Error;

use crate::domain::PlanId;
use crate::plan_actor::CatalogError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Plan is out of stock: {0}")]
    OutOfStock(PlanId),
    #[error("Session store error: {0}")]
    Session(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
