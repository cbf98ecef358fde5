//! Data model and store boundary for the commerce backend.
//!
//! This crate holds the persisted record types (`Customer`, `Product`,
//! `Order`, `OrderItem`), the order status state machine, and the narrow
//! store traits the core engine consumes. The surrounding CRUD layer owns
//! everything else about persistence; the core only requires that reads
//! reflect the most recent committed write for a given identifier.

pub mod customer;
pub mod error;
pub mod memory;
pub mod order;
pub mod product;
pub mod store;

pub use customer::Customer;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use store::{CustomerStore, OrderItemStore, OrderStore, ProductStore};
