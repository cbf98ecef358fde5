//! Order number allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use common::OrderNumber;

/// Allocates order numbers of the form `ORD-<yyyymmdd>-<sequence>`.
///
/// The sequence comes from an atomic counter, so two calls can never produce
/// the same number even within the same instant; the date segment is purely
/// informational. A timestamp-derived suffix alone would collide for orders
/// created on the same day.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    counter: AtomicU64,
}

impl OrderNumberGenerator {
    /// Creates a generator starting at sequence 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unique order number.
    pub fn next(&self) -> OrderNumber {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let date = Utc::now().format("%Y%m%d");
        OrderNumber::new(format!("ORD-{date}-{sequence:06}"))
    }
}
