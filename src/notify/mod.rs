//! Outbound channels: owner notification and buyer fulfillment.

pub mod fulfillment;
pub mod gateway;
pub mod messages;

pub use fulfillment::*;
pub use gateway::*;
pub use messages::*;
