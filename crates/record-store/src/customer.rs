use common::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer record.
///
/// The customer's orders are a derived back-reference maintained by the
/// order store (`find_orders_by_customer`), never a field on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// Unique across all customers; the store enforces the index.
    pub email: String,
    pub phone: Option<String>,
}

impl Customer {
    /// Creates a new customer record with a fresh identifier.
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            phone,
        }
    }
}
