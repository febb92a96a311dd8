use crate::domain::Order;

/// State transitions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// `pending -> approved`. A no-op on an already approved order.
    Approve,
    /// `pending -> rejected`. A no-op on an already rejected order.
    Reject,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Approve(ApprovalOutcome),
    Reject(Order),
}

/// The order after an approval request.
///
/// `transitioned` is true only for the one call that moved the order out of
/// `pending`; callers perform the one-time side effects on that call alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalOutcome {
    pub order: Order,
    pub transitioned: bool,
}
