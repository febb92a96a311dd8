//! Per-session carts backed by an injected session store.

pub mod error;
pub mod session;
pub mod store;

pub use error::*;
pub use session::*;
pub use store::*;
