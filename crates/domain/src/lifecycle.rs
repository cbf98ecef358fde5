//! Order lifecycle orchestration.

use common::{CustomerId, Money, OrderId, OrderItemId, OrderNumber, ProductId};
use record_store::{
    CustomerStore, Order, OrderItem, OrderItemStore, OrderStatus, OrderStore, ProductStore,
};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};
use crate::inventory::InventoryAdjuster;
use crate::lock::LockRegistry;
use crate::order_number::OrderNumberGenerator;
use crate::pricing::PricingCalculator;

/// A requested line item, as supplied by a caller.
///
/// When `unit_price` is absent the product's current price is snapshotted at
/// add time; an explicit price overrides the snapshot (e.g. a negotiated
/// price taken by the request layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Option<Money>,
}

impl NewOrderItem {
    /// Requests `quantity` units at the product's current price.
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            unit_price: None,
        }
    }

    /// Requests `quantity` units at an explicit unit price.
    pub fn priced(product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id,
            quantity,
            unit_price: Some(unit_price),
        }
    }
}

/// A created order together with its persisted line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Creates orders, mutates their line items, and drives state transitions
/// while keeping product stock consistent with which orders have been
/// finalized or cancelled.
///
/// Mutating operations on the same order are mutually exclusive: each takes
/// that order's lock for its whole scope, and the guard is released on every
/// exit path. Reads take no lock and see a consistent snapshot of the items
/// at the time of the read. An order's status and total are written only
/// here; product stock is written only through the [`InventoryAdjuster`].
pub struct OrderLifecycleManager<S> {
    store: S,
    inventory: InventoryAdjuster<S>,
    order_numbers: OrderNumberGenerator,
    order_locks: LockRegistry<OrderId>,
}

impl<S> OrderLifecycleManager<S>
where
    S: CustomerStore + ProductStore + OrderStore + OrderItemStore + Clone,
{
    /// Creates a lifecycle manager over the given store.
    pub fn new(store: S) -> Self {
        let inventory = InventoryAdjuster::new(store.clone());
        Self {
            store,
            inventory,
            order_numbers: OrderNumberGenerator::new(),
            order_locks: LockRegistry::new(),
        }
    }

    /// Creates a `PENDING` order for a customer with the requested items.
    ///
    /// Validates the customer and every item before persisting anything, so a
    /// failure leaves no partial order behind. Stock is not touched here;
    /// reservation happens only at finalize.
    #[tracing::instrument(skip(self, items))]
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderWithItems> {
        self.store
            .find_customer(customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound(customer_id))?;

        let order = Order::new(self.order_numbers.next(), customer_id);

        let mut order_items = Vec::with_capacity(items.len());
        for requested in items {
            order_items.push(self.build_item(&order, requested).await?);
        }

        // Items are written before the order row: the order must not become
        // findable until its item list is complete, otherwise a concurrent
        // finalize could commit a zero-item total against it.
        for (persisted, item) in order_items.iter().enumerate() {
            if let Err(err) = self.store.persist_item(item.clone()).await {
                self.discard_items(&order_items[..persisted]).await;
                return Err(err.into());
            }
        }
        if let Err(err) = self.store.persist_order(order.clone()).await {
            self.discard_items(&order_items).await;
            return Err(err.into());
        }

        metrics::counter!("orders_created").increment(1);
        tracing::info!(order_id = %order.id, order_number = %order.order_number, "order created");

        Ok(OrderWithItems {
            order,
            items: order_items,
        })
    }

    /// Adds a line item to a `PENDING` order, snapshotting the product price.
    #[tracing::instrument(skip(self))]
    pub async fn add_item_to_order(&self, order_id: OrderId, item: NewOrderItem) -> Result<OrderItem> {
        let lock = self.order_locks.lock_for(&order_id);
        let _guard = lock.lock().await;

        let order = self.pending_order(order_id, "add an item to").await?;
        let item = self.build_item(&order, item).await?;
        self.store.persist_item(item.clone()).await?;
        Ok(item)
    }

    /// Removes a line item from a `PENDING` order.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item_from_order(&self, order_id: OrderId, item_id: OrderItemId) -> Result<()> {
        let lock = self.order_locks.lock_for(&order_id);
        let _guard = lock.lock().await;

        self.pending_order(order_id, "remove an item from").await?;
        self.item_of_order(order_id, item_id).await?;
        self.store.remove_item(item_id).await?;
        Ok(())
    }

    /// Updates the quantity of a line item on a `PENDING` order.
    ///
    /// The unit price stays the snapshot captured when the item was added.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_item(
        &self,
        order_id: OrderId,
        item_id: OrderItemId,
        quantity: u32,
    ) -> Result<OrderItem> {
        let lock = self.order_locks.lock_for(&order_id);
        let _guard = lock.lock().await;

        self.pending_order(order_id, "update an item of").await?;
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }

        let mut item = self.item_of_order(order_id, item_id).await?;
        item.quantity = quantity;
        self.store.merge_item(item.clone()).await?;
        Ok(item)
    }

    /// Recomputes the order's total from its current items without
    /// persisting it.
    #[tracing::instrument(skip(self))]
    pub async fn calculate_order_total(&self, order_id: OrderId) -> Result<Money> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let items = self.store.items_for_order(order_id).await?;
        Ok(PricingCalculator::order_total(&items))
    }

    /// Finalizes a `PENDING` order: recomputes the total, reserves stock for
    /// every item (all-or-nothing), and persists the `FINALIZED` status with
    /// the snapshotted total in one step.
    ///
    /// Finalizing twice is an error, not a no-op; a failed reservation leaves
    /// the order `PENDING` and stock exactly as it was.
    #[tracing::instrument(skip(self))]
    pub async fn finalize_order(&self, order_id: OrderId) -> Result<Order> {
        let lock = self.order_locks.lock_for(&order_id);
        let _guard = lock.lock().await;

        let mut order = self
            .store
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;
        if !order.status.can_finalize() {
            return Err(OrderError::InvalidOrderState {
                status: order.status,
                action: "finalize",
            });
        }
        let items = self.store.items_for_order(order_id).await?;

        self.inventory.reserve_for(&items).await?;

        order.total_amount = PricingCalculator::order_total(&items);
        order.status = OrderStatus::Finalized;
        if let Err(err) = self.store.persist_order(order.clone()).await {
            // The reservation must not outlive a failed transition, and the
            // cleanup must not mask the error that triggered it.
            self.inventory.release_best_effort(&items).await;
            return Err(err.into());
        }

        metrics::counter!("orders_finalized").increment(1);
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order finalized");
        Ok(order)
    }

    /// Cancels a `PENDING` or `FINALIZED` order.
    ///
    /// Cancelling a finalized order releases the stock reserved at finalize;
    /// a pending order never reserved anything, so only the status changes.
    /// Cancelling a cancelled order is rejected.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let lock = self.order_locks.lock_for(&order_id);
        let _guard = lock.lock().await;

        let mut order = self
            .store
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if !order.status.can_cancel() {
            return Err(OrderError::InvalidOrderState {
                status: order.status,
                action: "cancel",
            });
        }

        let reserved_items = if order.status == OrderStatus::Finalized {
            self.store.items_for_order(order_id).await?
        } else {
            Vec::new()
        };

        // The status is committed before stock moves: if the write fails the
        // reservation is untouched, and a retried cancel of the same order is
        // rejected as terminal instead of releasing twice.
        order.status = OrderStatus::Cancelled;
        self.store.persist_order(order.clone()).await?;
        self.inventory.release_best_effort(&reserved_items).await;

        metrics::counter!("orders_cancelled").increment(1);
        tracing::info!(order_id = %order.id, "order cancelled");
        Ok(order)
    }

    // Read surface. Pure lookups report absence as `None`/empty, never as an
    // error.

    /// Looks up an order by id.
    pub async fn find_order_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.store.find_order(order_id).await?)
    }

    /// Looks up an order by its order number.
    pub async fn find_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        Ok(self.store.find_order_by_number(number).await?)
    }

    /// Returns all orders.
    pub async fn find_all_orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.find_all_orders().await?)
    }

    /// Returns a customer's orders (the derived back-reference).
    pub async fn find_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        Ok(self.store.find_orders_by_customer(customer_id).await?)
    }

    /// Returns an order's line items in insertion order.
    pub async fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        Ok(self.store.items_for_order(order_id).await?)
    }

    /// Best-effort removal of line items whose order row never became
    /// visible. Failures are logged; the error that aborted the write is
    /// what surfaces to the caller.
    async fn discard_items(&self, items: &[OrderItem]) {
        for item in items {
            if let Err(err) = self.store.remove_item(item.id).await {
                tracing::error!(item_id = %item.id, error = %err, "failed to discard line item");
            }
        }
    }

    /// Loads an order that must still accept item mutation.
    async fn pending_order(&self, order_id: OrderId, action: &'static str) -> Result<Order> {
        let order = self
            .store
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if !order.status.can_modify_items() {
            return Err(OrderError::InvalidOrderState {
                status: order.status,
                action,
            });
        }
        Ok(order)
    }

    /// Validates a requested item and snapshots its unit price.
    async fn build_item(&self, order: &Order, requested: NewOrderItem) -> Result<OrderItem> {
        if requested.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: requested.quantity,
            });
        }

        let product = self
            .store
            .find_product(requested.product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(requested.product_id))?;

        let unit_price = requested.unit_price.unwrap_or(product.price);
        Ok(OrderItem::new(
            order.id,
            product.id,
            requested.quantity,
            unit_price,
        ))
    }

    /// Loads a line item, checking it belongs to the order.
    async fn item_of_order(&self, order_id: OrderId, item_id: OrderItemId) -> Result<OrderItem> {
        let items = self.store.items_for_order(order_id).await?;
        items
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or(OrderError::ItemNotFound(item_id))
    }
}
