//! The Order aggregate root.
//!
//! An [`Order`] owns its [`OrderItem`](crate::domain::OrderItem) collection
//! exclusively: the pair is persisted and deleted as one unit, and items hold
//! only a numeric back-reference to their parent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{OrderItem, OrderItemDraft};

/// An order aggregate: header fields plus the owned item collection.
///
/// `id`, `created_at` and `updated_at` are store-managed; they are `None`
/// until the aggregate has been saved once. `order_number` is generated at
/// creation time and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<u64>,
    pub order_number: String,
    pub user_id: Option<u64>,
    pub shipping_address: String,
    pub billing_address: String,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Default status assigned when a creation payload leaves `status` unset.
pub const DEFAULT_STATUS: &str = "CREATED";

impl Order {
    /// Assembles an unsaved aggregate from a creation payload and a freshly
    /// generated order number. Item line totals are derived here.
    pub fn assemble(order_number: String, payload: OrderCreate) -> Self {
        let items = payload
            .items
            .into_iter()
            .map(OrderItemDraft::into_item)
            .collect();

        Self {
            id: None,
            order_number,
            user_id: payload.user_id,
            shipping_address: payload.shipping_address,
            billing_address: payload.billing_address,
            total_amount: payload.total_amount,
            status: payload
                .status
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created_at: None,
            updated_at: None,
            items,
        }
    }

    /// Copy of this order with the item collection stripped, for list views.
    pub fn without_items(&self) -> Self {
        Self {
            items: Vec::new(),
            ..self.clone()
        }
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub user_id: Option<u64>,
    pub shipping_address: String,
    pub billing_address: String,
    pub total_amount: Decimal,
    pub status: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemDraft>,
}

/// Payload for partially updating an order. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub total_amount: Option<Decimal>,
    pub status: Option<String>,
}

impl OrderUpdate {
    /// Applies the non-`None` fields to `order`.
    pub fn apply(self, order: &mut Order) {
        if let Some(shipping) = self.shipping_address {
            order.shipping_address = shipping;
        }
        if let Some(billing) = self.billing_address {
            order.billing_address = billing;
        }
        if let Some(total) = self.total_amount {
            order.total_amount = total;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> OrderCreate {
        OrderCreate {
            user_id: Some(7),
            shipping_address: "1 Main St".into(),
            billing_address: "1 Main St".into(),
            total_amount: Decimal::new(2000, 2),
            status: None,
            items: vec![OrderItemDraft {
                product_id: "SKU1".into(),
                quantity: 2,
                unit_price: Decimal::new(1000, 2),
            }],
        }
    }

    #[test]
    fn assemble_defaults_status_and_derives_line_totals() {
        let order = Order::assemble("ORD-20250101000000-42".into(), payload());

        assert_eq!(order.status, DEFAULT_STATUS);
        assert_eq!(order.id, None);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].total_line, Decimal::new(2000, 2));
    }

    #[test]
    fn assemble_keeps_explicit_status() {
        let mut create = payload();
        create.status = Some("PENDING".into());
        let order = Order::assemble("ORD-20250101000000-43".into(), create);
        assert_eq!(order.status, "PENDING");
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut order = Order::assemble("ORD-20250101000000-44".into(), payload());
        let update = OrderUpdate {
            status: Some("SHIPPED".into()),
            ..OrderUpdate::default()
        };
        update.apply(&mut order);

        assert_eq!(order.status, "SHIPPED");
        assert_eq!(order.shipping_address, "1 Main St");
        assert_eq!(order.total_amount, Decimal::new(2000, 2));
    }
}
