//! The orchestration core: order lifecycle operations and their policies
//! over the remote collaborators.

pub mod error;
pub mod order_items;
pub mod orders;

pub use error::*;
pub use order_items::*;
pub use orders::*;
