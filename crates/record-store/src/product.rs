use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product record.
///
/// `stock` is unsigned: a negative stock level is unrepresentable. Only the
/// inventory adjuster writes to it; order lifecycle code never assigns stock
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unique across all products; the store enforces the index.
    pub sku: String,
    /// Current list price. Field-level validation (price > 0) belongs to the
    /// CRUD layer that writes products.
    pub price: Money,
    pub stock: u32,
}

impl Product {
    /// Creates a new product record with a fresh identifier.
    pub fn new(name: impl Into<String>, sku: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            sku: sku.into(),
            price,
            stock,
        }
    }
}
