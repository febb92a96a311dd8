use thiserror::Error;

use crate::cart::CartError;
use crate::domain::{OrderId, PlanId};
use crate::order_actor::LedgerError;
use crate::plan_actor::CatalogError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReconcileError {
    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("Plan is out of stock: {0}")]
    OutOfStock(PlanId),
    /// Some cart items were taken before another buyer won the race for the
    /// rest. The taken units are not returned.
    #[error("Stock ran out during checkout: took {decremented:?}, missed {failed:?}")]
    PartialStockFailure { decremented: Vec<PlanId>, failed: Vec<PlanId> },
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Cart(#[from] CartError),
}
