//! Shared value types for the commerce backend.
//!
//! Typed identifiers for the four record kinds, the order number newtype,
//! and the exact-decimal `Money` amount.

pub mod ids;
pub mod money;

pub use ids::{CustomerId, OrderId, OrderItemId, OrderNumber, ProductId};
pub use money::Money;
