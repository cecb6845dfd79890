//! Runtime wiring: building the services from configuration, and the
//! tracing setup shared by binaries and tests.

pub mod order_system;
pub mod tracing;

pub use order_system::OrderSystem;
pub use tracing::setup_tracing;
