//! Order lifecycle and inventory-consistency engine.
//!
//! This crate provides the core of the commerce backend:
//! - [`OrderLifecycleManager`] — creates orders, mutates line items, and
//!   drives the `PENDING → FINALIZED / CANCELLED` transitions
//! - [`InventoryAdjuster`] — atomic per-product stock reserve/release
//! - [`PricingCalculator`] — exact decimal subtotals and totals
//! - [`OrderNumberGenerator`] — collision-free order number allocation
//!
//! The surrounding CRUD layer is a collaborator behind the `record-store`
//! traits; nothing here owns persistence beyond those interfaces.

pub mod error;
pub mod inventory;
pub mod lifecycle;
mod lock;
pub mod order_number;
pub mod pricing;

pub use error::{OrderError, Result};
pub use inventory::InventoryAdjuster;
pub use lifecycle::{NewOrderItem, OrderLifecycleManager, OrderWithItems};
pub use order_number::OrderNumberGenerator;
pub use pricing::PricingCalculator;
