//! Assembly of the order service from its collaborators.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::gateway::{CartGateway, HttpCartGateway, HttpIdentityGateway, IdentityGateway};
use crate::service::{OrderItemService, OrderService};
use crate::store::{MemoryOrderStore, OrderStore};

/// The wired-up service: one store handle, two gateway handles, and the two
/// services sharing them.
///
/// # Architecture Note
/// This is the composition root. Everything below it takes its dependencies
/// as constructor arguments, so tests can assemble the same services from
/// scripted gateways or an alternative store via [`OrderSystem::from_parts`].
pub struct OrderSystem<S, I, C> {
    /// Order lifecycle operations.
    pub orders: OrderService<S, I, C>,

    /// Order-item lifecycle operations.
    pub order_items: OrderItemService<S>,
}

impl OrderSystem<MemoryOrderStore, HttpIdentityGateway, HttpCartGateway> {
    /// Wires the bundled in-memory store to HTTP gateways built from
    /// `config`. The gateways share one connection pool.
    pub fn new(config: GatewayConfig) -> Self {
        let http = reqwest::Client::new();
        let store = Arc::new(MemoryOrderStore::new());
        let identity = Arc::new(HttpIdentityGateway::with_client(
            http.clone(),
            config.clone(),
        ));
        let carts = Arc::new(HttpCartGateway::with_client(http, config));

        Self::from_parts(store, identity, carts)
    }
}

impl<S, I, C> OrderSystem<S, I, C>
where
    S: OrderStore,
    I: IdentityGateway,
    C: CartGateway,
{
    /// Assembles the services around explicit collaborators.
    pub fn from_parts(store: Arc<S>, identity: Arc<I>, carts: Arc<C>) -> Self {
        Self {
            orders: OrderService::new(Arc::clone(&store), identity, carts),
            order_items: OrderItemService::new(store),
        }
    }
}
