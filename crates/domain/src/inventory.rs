//! Atomic stock adjustments.

use common::ProductId;
use record_store::{OrderItem, ProductStore};

use crate::error::{OrderError, Result};
use crate::lock::LockRegistry;

/// Applies signed stock deltas to products.
///
/// A product's stock is mutated exclusively through this type. Each
/// `reserve`/`release` runs its check-then-write under that product's lock,
/// so concurrent reserves against the last units of a product serialize and
/// at most one wins. Multi-item reservations touch products in ascending
/// product-id order and roll back on the first failure, leaving stock exactly
/// as it was.
pub struct InventoryAdjuster<S> {
    store: S,
    locks: LockRegistry<ProductId>,
}

impl<S: ProductStore> InventoryAdjuster<S> {
    /// Creates an adjuster over the given product store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: LockRegistry::new(),
        }
    }

    /// Atomically decrements the product's stock by `quantity`.
    ///
    /// Fails with [`OrderError::InsufficientStock`] if fewer units are
    /// available, leaving stock unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn reserve(&self, product_id: ProductId, quantity: u32) -> Result<()> {
        let lock = self.locks.lock_for(&product_id);
        let _guard = lock.lock().await;

        let mut product = self
            .store
            .find_product(product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(product_id))?;

        if product.stock < quantity {
            return Err(OrderError::InsufficientStock {
                product_id,
                requested: quantity,
                available: product.stock,
            });
        }

        product.stock -= quantity;
        self.store.persist_product(product).await?;
        Ok(())
    }

    /// Atomically increments the product's stock by `quantity`.
    ///
    /// No upper bound is enforced; this always succeeds for an existing
    /// product.
    #[tracing::instrument(skip(self))]
    pub async fn release(&self, product_id: ProductId, quantity: u32) -> Result<()> {
        let lock = self.locks.lock_for(&product_id);
        let _guard = lock.lock().await;

        let mut product = self
            .store
            .find_product(product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(product_id))?;

        product.stock = product.stock.saturating_add(quantity);
        self.store.persist_product(product).await?;
        Ok(())
    }

    /// Reserves stock for every item, all-or-nothing.
    ///
    /// Items are processed in ascending product-id order. If any reserve
    /// fails, the reserves already applied in this call are compensated with
    /// releases (in reverse) before the error is surfaced.
    pub async fn reserve_for(&self, items: &[OrderItem]) -> Result<()> {
        let ordered = by_product_id(items);
        let mut reserved: Vec<(ProductId, u32)> = Vec::with_capacity(ordered.len());

        for item in ordered {
            match self.reserve(item.product_id, item.quantity).await {
                Ok(()) => reserved.push((item.product_id, item.quantity)),
                Err(err) => {
                    metrics::counter!("reservations_failed").increment(1);
                    tracing::warn!(order_id = %item.order_id, error = %err, "rolling back partial reservation");
                    for (product_id, quantity) in reserved.into_iter().rev() {
                        if let Err(release_err) = self.release(product_id, quantity).await {
                            tracing::error!(
                                %product_id,
                                error = %release_err,
                                "failed to compensate reservation"
                            );
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Releases stock for every item (the inverse of a completed
    /// [`reserve_for`](Self::reserve_for)).
    pub async fn release_for(&self, items: &[OrderItem]) -> Result<()> {
        for item in by_product_id(items) {
            self.release(item.product_id, item.quantity).await?;
        }
        Ok(())
    }

    /// Releases stock for every item, logging and continuing past failures.
    ///
    /// Compensation paths use this instead of
    /// [`release_for`](Self::release_for): a cleanup failure must neither
    /// mask the error being compensated nor abandon the remaining items.
    pub async fn release_best_effort(&self, items: &[OrderItem]) {
        for item in by_product_id(items) {
            if let Err(err) = self.release(item.product_id, item.quantity).await {
                tracing::error!(
                    product_id = %item.product_id,
                    error = %err,
                    "failed to compensate reservation"
                );
            }
        }
    }
}

/// Fixed acquisition order: ascending product id, then item id.
fn by_product_id(items: &[OrderItem]) -> Vec<&OrderItem> {
    let mut ordered: Vec<&OrderItem> = items.iter().collect();
    ordered.sort_by_key(|item| (item.product_id, item.id));
    ordered
}
