//! Error taxonomy for lifecycle and inventory operations.

use common::{CustomerId, OrderId, OrderItemId, OrderNumber, ProductId};
use record_store::{OrderStatus, StoreError};
use thiserror::Error;

/// Errors surfaced by the order lifecycle and inventory operations.
///
/// Every operation either fully applies its effect or returns one of these
/// with the data model in its previous state; compensation for partial stock
/// changes happens internally before the error is returned.
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    /// The referenced customer does not exist.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The referenced line item does not exist on the order.
    #[error("order item not found: {0}")]
    ItemNotFound(OrderItemId),

    /// The order's status forbids the attempted operation.
    #[error("cannot {action} an order in status {status}")]
    InvalidOrderState {
        status: OrderStatus,
        action: &'static str,
    },

    /// A non-positive quantity was supplied for a line item.
    #[error("invalid quantity {quantity}: must be greater than zero")]
    InvalidQuantity { quantity: u32 },

    /// A stock decrement would drive the product's stock negative. The order
    /// stays `PENDING` and no partial stock change is retained.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The generator produced an order number that already exists. Unreachable
    /// by the generator's contract, but persisted writes still refuse to
    /// overwrite silently.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// Any other store failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateOrderNumber(number) => OrderError::DuplicateOrderNumber(number),
            other => OrderError::Store(other),
        }
    }
}

/// Result type for lifecycle and inventory operations.
pub type Result<T> = std::result::Result<T, OrderError>;
