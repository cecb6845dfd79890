//! Remote service collaborators: the identity registry and the cart store.
//!
//! # Architecture Note
//! Both gateways answer with [`Remote`], a three-outcome result. Keeping
//! "the service said no" apart from "the service could not be reached" is
//! what lets the orchestrator apply different policies per call site:
//! fail-open on the creation-time existence check, fail-soft during
//! enrichment. A gateway never makes that policy decision itself.

pub mod cart;
pub mod identity;
pub mod mock;

pub use cart::HttpCartGateway;
pub use identity::HttpIdentityGateway;

use async_trait::async_trait;
use serde_json::Value;

/// Outcome of a remote lookup.
///
/// `Absent` is an explicit, trusted "not found" answer from the remote
/// service; `Unavailable` means the answer is unknown because transport
/// failed or the service errored. Callers must never collapse the two.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    /// The remote service answered with a payload.
    Found(T),
    /// The remote service definitively reported the entity absent (404).
    Absent,
    /// The remote service was unreachable or returned an unexpected failure.
    Unavailable(String),
}

impl<T> Remote<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Payload if found, consuming the outcome.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// The remote user registry.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Does a user with this id exist?
    async fn check_exists(&self, user_id: u64) -> Remote<()>;

    /// Fetches the user's profile payload.
    async fn user(&self, user_id: u64) -> Remote<Value>;
}

/// The remote shopping-cart store.
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Fetches all carts belonging to a user.
    async fn carts_for_user(&self, user_id: u64) -> Remote<Value>;

    /// Fetches a single cart.
    async fn cart(&self, cart_id: u64) -> Remote<Value>;
}
