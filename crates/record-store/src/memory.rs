//! In-memory store implementation.
//!
//! Backs the tests and serves as the reference collaborator. Each record kind
//! lives behind its own `RwLock`, so a read returns a consistent snapshot of
//! that record kind at a point in time. Unique indexes (order number, email,
//! SKU) are checked on write, the way the real schema declares them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, OrderId, OrderItemId, OrderNumber, ProductId};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::store::{CustomerStore, OrderItemStore, OrderStore, ProductStore};
use crate::{Customer, Order, OrderItem, Product};

/// In-memory implementation of all four store traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    // Vec keeps insertion order, which is what the item enumeration exposes.
    items: Arc<RwLock<Vec<OrderItem>>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a customer, enforcing the unique email index.
    pub async fn add_customer(&self, customer: Customer) -> Result<Customer> {
        let mut customers = self.customers.write().await;
        if customers
            .values()
            .any(|c| c.email == customer.email && c.id != customer.id)
        {
            return Err(StoreError::DuplicateEmail(customer.email));
        }
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    /// Seeds a product, enforcing the unique SKU index.
    pub async fn add_product(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        if products
            .values()
            .any(|p| p.sku == product.sku && p.id != product.id)
        {
            return Err(StoreError::DuplicateSku(product.sku));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Returns the number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns the number of persisted line items across all orders.
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.customers.write().await.clear();
        self.products.write().await.clear();
        self.orders.write().await.clear();
        self.items.write().await.clear();
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn persist_product(&self, product: Product) -> Result<()> {
        self.products.write().await.insert(product.id, product);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn persist_order(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders
            .values()
            .any(|o| o.order_number == order.order_number && o.id != order.id)
        {
            return Err(StoreError::DuplicateOrderNumber(order.order_number));
        }
        orders.insert(order.id, order);
        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().find(|o| &o.order_number == number).cloned())
    }

    async fn find_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matched: Vec<_> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        matched.sort_by_key(|o| o.created_at);
        Ok(matched)
    }

    async fn find_all_orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all: Vec<_> = orders.values().cloned().collect();
        all.sort_by_key(|o| o.created_at);
        Ok(all)
    }
}

#[async_trait]
impl OrderItemStore for MemoryStore {
    async fn persist_item(&self, item: OrderItem) -> Result<()> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn merge_item(&self, item: OrderItem) -> Result<()> {
        let mut items = self.items.write().await;
        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        }
        Ok(())
    }

    async fn remove_item(&self, id: OrderItemId) -> Result<()> {
        self.items.write().await.retain(|i| i.id != id);
        Ok(())
    }

    async fn items_for_order(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}
