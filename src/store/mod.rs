//! The persistence collaborator for the Order aggregate.
//!
//! The orchestrator never talks to a concrete backend; it goes through the
//! [`OrderStore`] trait. The bundled [`MemoryOrderStore`] backs tests and the
//! demo wiring.
//!
//! # Architecture Note
//! The store is a *collaborator*, not part of the orchestration core. Its
//! contract is deliberately small: key-based CRUD plus filtered paged
//! listing. A save of a fresh aggregate is atomic with respect to the order
//! and its items.

pub mod memory;

pub use memory::MemoryOrderStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Order, OrderItem};

/// Errors surfaced by a store backend. Always fatal for the enclosing
/// request; the orchestrator performs no retries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The generated order number collided with an existing order.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(String),

    /// An item referenced an order that does not exist.
    #[error("order {0} does not exist")]
    MissingOrder(u64),

    /// The backend itself failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Filter applied to the order listing.
///
/// The variants are mutually exclusive; [`OrderFilter::from_params`] resolves
/// a pair of optional inputs with fixed precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    None,
    ByUser(u64),
    ByStatus(String),
    ByUserAndStatus(u64, String),
}

impl OrderFilter {
    /// Resolves optional filter inputs. Precedence: both > user-only >
    /// status-only > unfiltered.
    pub fn from_params(user_id: Option<u64>, status: Option<String>) -> Self {
        match (user_id, status) {
            (Some(user), Some(status)) => Self::ByUserAndStatus(user, status),
            (Some(user), None) => Self::ByUser(user),
            (None, Some(status)) => Self::ByStatus(status),
            (None, None) => Self::None,
        }
    }

    /// Whether `order` passes this filter.
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::None => true,
            Self::ByUser(user) => order.user_id == Some(*user),
            Self::ByStatus(status) => order.status == *status,
            Self::ByUserAndStatus(user, status) => {
                order.user_id == Some(*user) && order.status == *status
            }
        }
    }
}

/// Default page size when the caller supplies none, or an out-of-range one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on the page size; larger requests are clamped, never rejected.
pub const MAX_LIMIT: u32 = 100;

/// A clamped pagination request. Construction never fails: out-of-range
/// inputs are silently pulled into range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Clamps `page` to a minimum of 1. A `limit` below 1 falls back to
    /// [`DEFAULT_LIMIT`]; one above [`MAX_LIMIT`] is capped there.
    pub fn new(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = if limit < 1 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        Self { page, limit }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

/// One page of results plus the totals a caller needs for paging arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Builds a page from an already-sliced item window and the unsliced
    /// total count.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total.div_ceil(u64::from(request.limit())),
        }
    }
}

/// Persistence contract for the Order aggregate and its items.
///
/// Implementations are stateless handles: cheap to clone, safe for
/// concurrent use, no per-call session.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetches an order with its full item collection.
    async fn find_by_id(&self, id: u64) -> Result<Option<Order>, StoreError>;

    /// Persists an aggregate. A fresh aggregate (no id) gets an id and
    /// timestamps assigned, with order and items committed together; a saved
    /// one is replaced in place. Returns the stored representation.
    async fn save(&self, order: Order) -> Result<Order, StoreError>;

    /// Removes an order, cascading to its items. Removing an absent id is a
    /// no-op.
    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;

    /// Whether an order with this id exists.
    async fn exists_by_id(&self, id: u64) -> Result<bool, StoreError>;

    /// Paged, filtered listing. Returned orders carry no item collections.
    async fn find_page(
        &self,
        filter: OrderFilter,
        request: PageRequest,
    ) -> Result<Page<Order>, StoreError>;

    /// Fetches a single item.
    async fn find_item(&self, id: u64) -> Result<Option<OrderItem>, StoreError>;

    /// Persists an item. A fresh item must reference an existing order;
    /// otherwise [`StoreError::MissingOrder`] is returned.
    async fn save_item(&self, item: OrderItem) -> Result<OrderItem, StoreError>;

    /// Removes an item. Removing an absent id is a no-op.
    async fn delete_item(&self, id: u64) -> Result<(), StoreError>;

    /// Whether an item with this id exists.
    async fn item_exists(&self, id: u64) -> Result<bool, StoreError>;

    /// Paged item listing, optionally restricted to one order.
    async fn find_items_page(
        &self,
        order_id: Option<u64>,
        request: PageRequest,
    ) -> Result<Page<OrderItem>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_page_floor() {
        assert_eq!(PageRequest::new(0, 20).page(), 1);
        assert_eq!(PageRequest::new(3, 20).page(), 3);
    }

    #[test]
    fn page_request_clamps_limit_into_range() {
        assert_eq!(PageRequest::new(1, 0).limit(), DEFAULT_LIMIT);
        assert_eq!(PageRequest::new(1, 500).limit(), MAX_LIMIT);
        assert_eq!(PageRequest::new(1, 55).limit(), 55);
    }

    #[test]
    fn filter_precedence_prefers_both_then_user_then_status() {
        assert_eq!(
            OrderFilter::from_params(Some(1), Some("CREATED".into())),
            OrderFilter::ByUserAndStatus(1, "CREATED".into())
        );
        assert_eq!(
            OrderFilter::from_params(Some(1), None),
            OrderFilter::ByUser(1)
        );
        assert_eq!(
            OrderFilter::from_params(None, Some("CREATED".into())),
            OrderFilter::ByStatus("CREATED".into())
        );
        assert_eq!(OrderFilter::from_params(None, None), OrderFilter::None);
    }

    #[test]
    fn page_totals_round_up() {
        let page = Page::<u32>::new(vec![], PageRequest::new(1, 20), 41);
        assert_eq!(page.total_pages, 3);

        let exact = Page::<u32>::new(vec![], PageRequest::new(1, 20), 40);
        assert_eq!(exact.total_pages, 2);
    }
}
