//! In-memory [`OrderStore`] backend.
//!
//! Keeps orders and items in flat maps behind a single `RwLock`, which gives
//! the aggregate save the one-writer atomicity the contract asks for. Used by
//! the test suites and the demo wiring; a real deployment would swap in a
//! database-backed implementation of the same trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Order, OrderItem};
use crate::store::{OrderFilter, OrderStore, Page, PageRequest, StoreError};

#[derive(Debug, Default)]
struct Inner {
    orders: HashMap<u64, Order>,
    items: HashMap<u64, OrderItem>,
    next_order_id: u64,
    next_item_id: u64,
}

/// In-memory order store. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn items_of(&self, order_id: u64) -> Vec<OrderItem> {
        let mut items: Vec<OrderItem> = self
            .items
            .values()
            .filter(|item| item.order_id == Some(order_id))
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    fn attach_item(&mut self, order_id: u64, mut item: OrderItem) -> OrderItem {
        if item.id.is_none() {
            self.next_item_id += 1;
            item.id = Some(self.next_item_id);
            item.created_at = Some(Utc::now());
        }
        item.order_id = Some(order_id);
        // Invariant: ids are assigned above, so the unwrap_or cannot fire.
        self.items.insert(item.id.unwrap_or_default(), item.clone());
        item
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<Order>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.orders.get(&id).map(|order| {
            let mut order = order.clone();
            order.items = inner.items_of(id);
            order
        }))
    }

    async fn save(&self, mut order: Order) -> Result<Order, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let id = match order.id {
            Some(id) => {
                if !inner.orders.contains_key(&id) {
                    return Err(StoreError::MissingOrder(id));
                }
                order.updated_at = Some(now);
                id
            }
            None => {
                let duplicate = inner
                    .orders
                    .values()
                    .any(|existing| existing.order_number == order.order_number);
                if duplicate {
                    return Err(StoreError::DuplicateOrderNumber(order.order_number));
                }
                inner.next_order_id += 1;
                let id = inner.next_order_id;
                order.id = Some(id);
                order.created_at = Some(now);
                order.updated_at = Some(now);
                id
            }
        };

        // The aggregate's item collection is authoritative: replace whatever
        // was attached before, then re-attach.
        inner.items.retain(|_, item| item.order_id != Some(id));
        let items: Vec<OrderItem> = order
            .items
            .drain(..)
            .map(|item| inner.attach_item(id, item))
            .collect();
        order.items = items;

        let mut stored = order.clone();
        stored.items = Vec::new();
        inner.orders.insert(id, stored);
        debug!(order_id = id, "order saved");

        Ok(order)
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.orders.remove(&id);
        inner.items.retain(|_, item| item.order_id != Some(id));
        Ok(())
    }

    async fn exists_by_id(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.orders.contains_key(&id))
    }

    async fn find_page(
        &self,
        filter: OrderFilter,
        request: PageRequest,
    ) -> Result<Page<Order>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&Order> = inner
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .collect();
        matching.sort_by_key(|order| order.id);

        let total = matching.len() as u64;
        let window = matching
            .into_iter()
            .skip(request.offset())
            .take(request.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(window, request, total))
    }

    async fn find_item(&self, id: u64) -> Result<Option<OrderItem>, StoreError> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn save_item(&self, item: OrderItem) -> Result<OrderItem, StoreError> {
        let mut inner = self.inner.write().await;
        let order_id = item
            .order_id
            .ok_or_else(|| StoreError::Backend("item has no parent order reference".into()))?;
        if !inner.orders.contains_key(&order_id) {
            return Err(StoreError::MissingOrder(order_id));
        }
        Ok(inner.attach_item(order_id, item))
    }

    async fn delete_item(&self, id: u64) -> Result<(), StoreError> {
        self.inner.write().await.items.remove(&id);
        Ok(())
    }

    async fn item_exists(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.items.contains_key(&id))
    }

    async fn find_items_page(
        &self,
        order_id: Option<u64>,
        request: PageRequest,
    ) -> Result<Page<OrderItem>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&OrderItem> = inner
            .items
            .values()
            .filter(|item| order_id.is_none() || item.order_id == order_id)
            .collect();
        matching.sort_by_key(|item| item.id);

        let total = matching.len() as u64;
        let window = matching
            .into_iter()
            .skip(request.offset())
            .take(request.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(window, request, total))
    }
}
