//! Pure data structures for the Order aggregate and its creation/update payloads.

pub mod order;
pub mod order_item;

pub use order::*;
pub use order_item::*;
