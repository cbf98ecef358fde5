//! Order and line item records, plus the order status state machine.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, OrderItemId, OrderNumber, ProductId};
use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Transitions:
/// ```text
/// PENDING ──finalize──► FINALIZED
///    │                      │
///    └──────cancel──────────┴──► CANCELLED
/// ```
///
/// `CANCELLED` is terminal. `PENDING` is the only status in which line items
/// may be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is open; items can be added, removed, and updated.
    #[default]
    Pending,

    /// Total snapshotted and stock reserved (terminal for item mutation).
    Finalized,

    /// Order was cancelled (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if line items can be mutated in this status.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can be finalized from this status.
    pub fn can_finalize(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Finalized)
    }

    /// Returns true if no further transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Returns the status name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Finalized => "FINALIZED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An order record.
///
/// Line items live in the order-item store, keyed by `order_id`; the record
/// itself carries only the scalar columns. `total_amount` is a derived value:
/// it is refreshed in the same step as the `PENDING → FINALIZED` transition
/// and must not be trusted before then (recompute from items instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub created_at: DateTime<Utc>,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total_amount: Money,
}

impl Order {
    /// Creates a new pending order with a zero total.
    pub fn new(order_number: OrderNumber, customer_id: CustomerId) -> Self {
        Self {
            id: OrderId::new(),
            order_number,
            created_at: Utc::now(),
            customer_id,
            status: OrderStatus::Pending,
            total_amount: Money::zero(),
        }
    }
}

/// A single line item of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price captured when the item was added; later product price changes
    /// do not affect it.
    pub unit_price: Money,
}

impl OrderItem {
    /// Creates a new line item for an order.
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product_id,
            quantity,
            unit_price,
        }
    }

    /// Derived subtotal: `quantity × unit_price`, computed on read.
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn only_pending_can_modify_items() {
        assert!(OrderStatus::Pending.can_modify_items());
        assert!(!OrderStatus::Finalized.can_modify_items());
        assert!(!OrderStatus::Cancelled.can_modify_items());
    }

    #[test]
    fn only_pending_can_finalize() {
        assert!(OrderStatus::Pending.can_finalize());
        assert!(!OrderStatus::Finalized.can_finalize());
        assert!(!OrderStatus::Cancelled.can_finalize());
    }

    #[test]
    fn cancelled_is_the_only_terminal_status() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Finalized.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Finalized.is_terminal());
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Finalized).unwrap(),
            "\"FINALIZED\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
    }

    #[test]
    fn new_order_starts_pending_with_zero_total() {
        let order = Order::new(OrderNumber::new("ORD-1"), CustomerId::new());
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.total_amount.is_zero());
    }

    #[test]
    fn item_subtotal_is_quantity_times_price() {
        let item = OrderItem::new(
            OrderId::new(),
            ProductId::new(),
            3,
            Money::new(dec!(9.99)),
        );
        assert_eq!(item.subtotal(), Money::new(dec!(29.97)));
    }
}
