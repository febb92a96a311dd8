//! Typed clients over the resource actors.

#[macro_use]
mod macros;
pub mod order_ledger;
pub mod plan_catalog;

pub use order_ledger::*;
pub use plan_catalog::*;
