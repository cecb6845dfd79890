//! Order line items and the line-total derivation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derives a line total from its two inputs.
///
/// Every business mutation of quantity or unit price goes through this
/// function; `total_line` is never set independently of its factors outside
/// of store rehydration.
pub fn compute_line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// A line item owned by an [`Order`](crate::domain::Order).
///
/// `id`, `order_id` and `created_at` are store-managed. `total_line` is the
/// derived attribute `unit_price * quantity`; mutate it through
/// [`OrderItem::set_quantity`] and [`OrderItem::set_unit_price`]. The fields
/// are public so a store backend can rehydrate items directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<u64>,
    pub order_id: Option<u64>,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_line: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderItem {
    /// Creates an unsaved item with its line total derived.
    pub fn new(product_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: None,
            order_id: None,
            product_id: product_id.into(),
            quantity,
            unit_price,
            total_line: compute_line_total(unit_price, quantity),
            created_at: None,
        }
    }

    /// Updates the quantity and recomputes the line total from the stored
    /// unit price.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_line = compute_line_total(self.unit_price, self.quantity);
    }

    /// Updates the unit price and recomputes the line total from the stored
    /// quantity.
    pub fn set_unit_price(&mut self, unit_price: Decimal) {
        self.unit_price = unit_price;
        self.total_line = compute_line_total(self.unit_price, self.quantity);
    }
}

/// A line item inside an order-creation payload, before the parent exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItemDraft {
    /// Materializes the draft into an unsaved [`OrderItem`].
    pub fn into_item(self) -> OrderItem {
        OrderItem::new(self.product_id, self.quantity, self.unit_price)
    }
}

/// Payload for creating a standalone item against an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemCreate {
    pub order_id: u64,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Payload for partially updating an item. Only quantity and unit price are
/// mutable; either change recomputes the line total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemUpdate {
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_price_times_quantity() {
        assert_eq!(
            compute_line_total(Decimal::new(1050, 2), 3),
            Decimal::new(3150, 2)
        );
        assert_eq!(compute_line_total(Decimal::new(999, 2), 0), Decimal::ZERO);
    }

    #[test]
    fn quantity_change_recomputes_with_stored_price() {
        let mut item = OrderItem::new("SKU1", 2, Decimal::new(1000, 2));
        assert_eq!(item.total_line, Decimal::new(2000, 2));

        item.set_quantity(5);
        assert_eq!(item.total_line, Decimal::new(5000, 2));
    }

    #[test]
    fn price_change_recomputes_with_stored_quantity() {
        let mut item = OrderItem::new("SKU1", 4, Decimal::new(250, 2));
        item.set_unit_price(Decimal::new(300, 2));
        assert_eq!(item.total_line, Decimal::new(1200, 2));
    }
}
