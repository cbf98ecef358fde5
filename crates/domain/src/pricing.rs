//! Exact decimal pricing.

use common::Money;
use record_store::OrderItem;

/// Computes line item subtotals and order totals.
///
/// All arithmetic is exact decimal; nothing is rounded. Totals are summed in
/// ascending item-identifier order so a recomputation over the same items is
/// always reproducible.
pub struct PricingCalculator;

impl PricingCalculator {
    /// Subtotal for a single line item: `quantity × unit_price`.
    pub fn item_subtotal(item: &OrderItem) -> Money {
        item.subtotal()
    }

    /// Total for an order's items. Zero items yields zero, not an error.
    pub fn order_total(items: &[OrderItem]) -> Money {
        let mut ordered: Vec<&OrderItem> = items.iter().collect();
        ordered.sort_by_key(|item| item.id);
        ordered.into_iter().map(OrderItem::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{OrderId, ProductId};
    use rust_decimal_macros::dec;

    fn item(quantity: u32, price: &str) -> OrderItem {
        OrderItem::new(
            OrderId::new(),
            ProductId::new(),
            quantity,
            Money::new(price.parse().unwrap()),
        )
    }

    #[test]
    fn subtotal_is_exact() {
        assert_eq!(
            PricingCalculator::item_subtotal(&item(2, "10.00")),
            Money::new(dec!(20.00))
        );
        // No binary floating drift: 0.1 * 3 is exactly 0.3.
        assert_eq!(
            PricingCalculator::item_subtotal(&item(3, "0.1")),
            Money::new(dec!(0.3))
        );
    }

    #[test]
    fn total_sums_item_subtotals() {
        let items = vec![item(2, "10.00"), item(1, "5.00")];
        assert_eq!(
            PricingCalculator::order_total(&items),
            Money::new(dec!(25.00))
        );
    }

    #[test]
    fn total_of_no_items_is_zero() {
        assert_eq!(PricingCalculator::order_total(&[]), Money::zero());
    }

    #[test]
    fn total_is_independent_of_slice_order() {
        let a = item(1, "1.01");
        let b = item(2, "2.02");
        let c = item(3, "3.03");

        let forward = PricingCalculator::order_total(&[a.clone(), b.clone(), c.clone()]);
        let backward = PricingCalculator::order_total(&[c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn total_is_idempotent() {
        let items = vec![item(4, "2.50"), item(1, "0.01")];
        assert_eq!(
            PricingCalculator::order_total(&items),
            PricingCalculator::order_total(&items)
        );
    }
}
