use common::OrderNumber;
use thiserror::Error;

/// Errors raised by a record store.
///
/// Stores only fail on uniqueness violations; lookups report absence through
/// `Option`, not an error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// An order with this order number is already persisted.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// A customer with this email is already persisted.
    #[error("duplicate customer email: {0}")]
    DuplicateEmail(String),

    /// A product with this SKU is already persisted.
    #[error("duplicate product SKU: {0}")]
    DuplicateSku(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
