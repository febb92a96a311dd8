/// Custom actions for Plan entities.
///
/// Each action runs inside the catalog actor with exclusive access to the
/// row, so a test and the write that depends on it can never interleave
/// with another request.
#[derive(Debug, Clone)]
pub enum PlanAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Decrements stock by exactly one if it is positive.
    TryDecrement,
}

/// Results from PlanActions - variants match 1:1 with PlanAction
#[derive(Debug, Clone, PartialEq)]
pub enum PlanActionResult {
    CheckStock(u64),
    /// `true` if a unit was taken.
    TryDecrement(bool),
}
