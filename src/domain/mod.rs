pub mod plan;
pub mod order;

pub use plan::*;
pub use order::*;
