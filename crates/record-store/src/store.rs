//! Store traits consumed by the core engine.
//!
//! These are the narrow interfaces the excluded CRUD layer exposes to the
//! lifecycle code. Lookups return `Option`; only uniqueness violations are
//! errors. Method names are distinct across traits so a single backend can
//! implement all four without call-site ambiguity.

use async_trait::async_trait;
use common::{CustomerId, OrderId, OrderItemId, OrderNumber, ProductId};

use crate::error::Result;
use crate::{Customer, Order, OrderItem, Product};

/// Read access to customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>>;
}

/// Access to product records.
///
/// `persist_product` is used only by the inventory adjuster after a stock
/// change (and by the CRUD layer, which is out of scope here).
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>>;

    async fn persist_product(&self, product: Product) -> Result<()>;
}

/// Access to order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts or updates an order. Fails with
    /// [`StoreError::DuplicateOrderNumber`](crate::StoreError::DuplicateOrderNumber)
    /// if a different order already holds the same order number.
    async fn persist_order(&self, order: Order) -> Result<()>;

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>>;

    async fn find_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>>;

    async fn find_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    async fn find_all_orders(&self) -> Result<Vec<Order>>;
}

/// Access to order line items, enumerated per order.
#[async_trait]
pub trait OrderItemStore: Send + Sync {
    async fn persist_item(&self, item: OrderItem) -> Result<()>;

    /// Updates an existing item in place.
    async fn merge_item(&self, item: OrderItem) -> Result<()>;

    async fn remove_item(&self, id: OrderItemId) -> Result<()>;

    /// Returns the order's items in insertion order.
    async fn items_for_order(&self, order_id: OrderId) -> Result<Vec<OrderItem>>;
}
