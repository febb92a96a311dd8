//! Orchestration of checkout, payment-reference submission and approval.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
