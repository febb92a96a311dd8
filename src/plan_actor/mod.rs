//! Plan-specific domain logic, including the conditional stock decrement.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
