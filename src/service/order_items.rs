//! Order-item lifecycle operations.
//!
//! Items only ever exist against a saved order; standalone creation checks
//! the parent first. Mutation is limited to quantity and unit price, and
//! either change re-derives the line total.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{OrderItem, OrderItemCreate, OrderItemUpdate};
use crate::service::ServiceError;
use crate::store::{OrderStore, Page, PageRequest};

/// CRUD service for order items.
pub struct OrderItemService<S> {
    store: Arc<S>,
}

impl<S> Clone for OrderItemService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> OrderItemService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates an item against an existing order, deriving its line total.
    #[instrument(skip(self, payload))]
    pub async fn create_item(&self, payload: OrderItemCreate) -> Result<OrderItem, ServiceError> {
        debug!(?payload, "create_item called");
        if !self.store.exists_by_id(payload.order_id).await? {
            return Err(ServiceError::NotFound(format!(
                "order {}",
                payload.order_id
            )));
        }

        let mut item = OrderItem::new(payload.product_id, payload.quantity, payload.unit_price);
        item.order_id = Some(payload.order_id);

        let saved = self.store.save_item(item).await?;
        info!(item_id = saved.id, order_id = payload.order_id, "order item created");
        Ok(saved)
    }

    /// Fetches a single item.
    #[instrument(skip(self))]
    pub async fn item(&self, id: u64) -> Result<OrderItem, ServiceError> {
        self.store
            .find_item(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order item {id}")))
    }

    /// Paged item listing, optionally restricted to one order.
    #[instrument(skip(self))]
    pub async fn items(
        &self,
        order_id: Option<u64>,
        request: PageRequest,
    ) -> Result<Page<OrderItem>, ServiceError> {
        Ok(self.store.find_items_page(order_id, request).await?)
    }

    /// Paged listing of one order's items.
    #[instrument(skip(self))]
    pub async fn items_for_order(
        &self,
        order_id: u64,
        request: PageRequest,
    ) -> Result<Page<OrderItem>, ServiceError> {
        Ok(self.store.find_items_page(Some(order_id), request).await?)
    }

    /// Partial update of quantity and/or unit price. A change to either
    /// factor recomputes the line total against the stored counterpart.
    #[instrument(skip(self, update))]
    pub async fn update_item(
        &self,
        id: u64,
        update: OrderItemUpdate,
    ) -> Result<OrderItem, ServiceError> {
        debug!(?update, "update_item called");
        let mut item = self
            .store
            .find_item(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order item {id}")))?;

        if let Some(quantity) = update.quantity {
            item.set_quantity(quantity);
        }
        if let Some(unit_price) = update.unit_price {
            item.set_unit_price(unit_price);
        }

        let saved = self.store.save_item(item).await?;
        info!(item_id = id, "order item updated");
        Ok(saved)
    }

    /// Deletes an item. Returns whether anything was deleted; a missing id
    /// is not an error.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: u64) -> Result<bool, ServiceError> {
        if !self.store.item_exists(id).await? {
            debug!(item_id = id, "nothing to delete");
            return Ok(false);
        }
        self.store.delete_item(id).await?;
        info!(item_id = id, "order item deleted");
        Ok(true)
    }
}
