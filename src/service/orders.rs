//! Order orchestration: creation with remote identity validation,
//! enrichment by fan-out to the remote collaborators, and plain CRUD.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::domain::{Order, OrderCreate, OrderUpdate};
use crate::gateway::{CartGateway, IdentityGateway, Remote};
use crate::service::ServiceError;
use crate::store::{OrderFilter, OrderStore, Page, PageRequest};

const MAX_ADDRESS_LEN: usize = 300;
const MAX_STATUS_LEN: usize = 50;

/// Composite read-model assembled by [`OrderService::enriched_order`].
///
/// Either remote section degrades to a placeholder on its own; a gateway
/// failure never fails the whole view. The sections are `None` only when the
/// order has no owning user to look up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedOrder {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_carts: Option<Value>,
}

/// Generates an order number: `ORD-` + a second-granularity UTC timestamp +
/// a random suffix in `[0, 9999]`.
///
/// No collision handling happens here; uniqueness is enforced by the store's
/// order-number constraint, and a collision surfaces as a store error.
fn generate_order_number() -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("ORD-{timestamp}-{suffix}")
}

fn validate_create(payload: &OrderCreate) -> Result<(), ServiceError> {
    fn check_address(label: &str, value: &str) -> Result<(), ServiceError> {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!(
                "{label} address must not be empty"
            )));
        }
        if value.len() > MAX_ADDRESS_LEN {
            return Err(ServiceError::Validation(format!(
                "{label} address must not exceed {MAX_ADDRESS_LEN} characters"
            )));
        }
        Ok(())
    }

    check_address("shipping", &payload.shipping_address)?;
    check_address("billing", &payload.billing_address)?;

    if payload.total_amount <= Decimal::ZERO {
        return Err(ServiceError::Validation(
            "total amount must be positive".to_string(),
        ));
    }
    if let Some(status) = &payload.status {
        if status.len() > MAX_STATUS_LEN {
            return Err(ServiceError::Validation(format!(
                "status must not exceed {MAX_STATUS_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Orchestrator for the order lifecycle.
///
/// Holds handles to the persistence collaborator and the two remote
/// gateways. The handles are stateless and shared; the service itself is
/// cheap to clone.
///
/// # Architecture Note
/// The gateways only report [`Remote`] outcomes. The *policy* over those
/// outcomes — fail open on an unreachable identity registry at creation
/// time, fail soft during enrichment — lives here, at the call sites, where
/// it is visible and testable.
pub struct OrderService<S, I, C> {
    store: Arc<S>,
    identity: Arc<I>,
    carts: Arc<C>,
}

impl<S, I, C> Clone for OrderService<S, I, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            identity: Arc::clone(&self.identity),
            carts: Arc::clone(&self.carts),
        }
    }
}

impl<S, I, C> OrderService<S, I, C>
where
    S: OrderStore,
    I: IdentityGateway,
    C: CartGateway,
{
    pub fn new(store: Arc<S>, identity: Arc<I>, carts: Arc<C>) -> Self {
        Self {
            store,
            identity,
            carts,
        }
    }

    /// Creates an order, validating the owning user against the identity
    /// registry first.
    ///
    /// The existence check has three outcomes: an affirmed user proceeds, an
    /// explicit "absent" answer rejects the whole operation before anything
    /// is persisted, and an unreachable registry fails open — order intake
    /// must not hard-depend on the registry's availability.
    #[instrument(skip(self, payload))]
    pub async fn create_order(&self, payload: OrderCreate) -> Result<Order, ServiceError> {
        debug!(?payload, "create_order called");
        validate_create(&payload)?;

        if let Some(user_id) = payload.user_id {
            match self.identity.check_exists(user_id).await {
                Remote::Found(()) => {
                    debug!(user_id, "user verified in identity registry");
                }
                Remote::Absent => {
                    warn!(user_id, "rejecting order: user does not exist");
                    return Err(ServiceError::Validation(format!(
                        "user {user_id} does not exist"
                    )));
                }
                Remote::Unavailable(reason) => {
                    // Fail open: proceed as validated rather than couple
                    // order intake to registry availability.
                    warn!(user_id, %reason, "identity registry unavailable, proceeding unverified");
                }
            }
        }

        let order = Order::assemble(generate_order_number(), payload);
        let saved = self.store.save(order).await?;
        info!(
            order_id = saved.id,
            order_number = %saved.order_number,
            items = saved.items.len(),
            "order created"
        );
        Ok(saved)
    }

    /// Fetches an order with its items.
    #[instrument(skip(self))]
    pub async fn order(&self, id: u64) -> Result<Order, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))
    }

    /// Paged listing with optional owner/status filters. List entries carry
    /// no item collections.
    #[instrument(skip(self))]
    pub async fn orders(
        &self,
        user_id: Option<u64>,
        status: Option<String>,
        request: PageRequest,
    ) -> Result<Page<Order>, ServiceError> {
        let filter = OrderFilter::from_params(user_id, status);
        debug!(?filter, "listing orders");
        Ok(self.store.find_page(filter, request).await?)
    }

    /// Paged listing of one user's orders.
    #[instrument(skip(self))]
    pub async fn orders_for_user(
        &self,
        user_id: u64,
        request: PageRequest,
    ) -> Result<Page<Order>, ServiceError> {
        Ok(self
            .store
            .find_page(OrderFilter::ByUser(user_id), request)
            .await?)
    }

    /// Partial update: only the supplied fields are applied.
    #[instrument(skip(self, update))]
    pub async fn update_order(&self, id: u64, update: OrderUpdate) -> Result<Order, ServiceError> {
        debug!(?update, "update_order called");
        let mut order = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))?;

        update.apply(&mut order);
        let saved = self.store.save(order).await?;
        info!(order_id = id, "order updated");
        Ok(saved)
    }

    /// Deletes an order and its items. Returns whether anything was deleted;
    /// a missing id is not an error.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: u64) -> Result<bool, ServiceError> {
        if !self.store.exists_by_id(id).await? {
            debug!(order_id = id, "nothing to delete");
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        info!(order_id = id, "order deleted");
        Ok(true)
    }

    /// Assembles the composite view: the order plus user and cart data
    /// fetched live from the remote collaborators.
    ///
    /// Enrichment is best-effort. A missing order is the only hard failure,
    /// answered before any remote call. Each gateway section independently
    /// degrades to a placeholder on any non-`Found` outcome.
    #[instrument(skip(self))]
    pub async fn enriched_order(&self, id: u64) -> Result<EnrichedOrder, ServiceError> {
        let order = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {id}")))?;

        let (user, user_carts) = match order.user_id {
            Some(user_id) => {
                let user = match self.identity.user(user_id).await {
                    Remote::Found(payload) => payload,
                    outcome => {
                        debug!(user_id, ?outcome, "substituting user placeholder");
                        json!({ "error": "User not found" })
                    }
                };
                let carts = match self.carts.carts_for_user(user_id).await {
                    Remote::Found(payload) => payload,
                    outcome => {
                        debug!(user_id, ?outcome, "substituting cart placeholder");
                        json!({ "info": "No carts found" })
                    }
                };
                (Some(user), Some(carts))
            }
            None => (None, None),
        };

        Ok(EnrichedOrder {
            order,
            user,
            user_carts,
        })
    }
}
