//! Shopping Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Unit price
    pub price: Decimal,

    /// Quantity
    pub qty: u32,

    /// Caller-defined identifier (e.g. a SKU), only read by eligibility rules
    #[serde(default)]
    pub additional_id: Option<String>,
}

impl Cart {
    /// Create a new cart line without an identifier.
    pub fn new(price: Decimal, qty: u32) -> Self {
        Self {
            price,
            qty,
            additional_id: None,
        }
    }

    /// Return a copy of this line carrying the given identifier.
    #[must_use]
    pub fn with_additional_id(mut self, additional_id: impl Into<String>) -> Self {
        self.additional_id = Some(additional_id.into());
        self
    }

    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// Cart lines plus their caller-computed aggregates.
///
/// The engine only reads `subtotal` and `grand_total`; it never derives them from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    carts: Vec<Cart>,
    subtotal: Decimal,
    grand_total: Decimal,
}

impl ShoppingCart {
    /// Create a shopping cart from lines and precomputed aggregates.
    pub fn new(carts: impl Into<Vec<Cart>>, subtotal: Decimal, grand_total: Decimal) -> Self {
        Self {
            carts: carts.into(),
            subtotal,
            grand_total,
        }
    }

    /// Create a shopping cart whose subtotal and grand total are both the sum of its lines.
    pub fn from_lines(carts: impl Into<Vec<Cart>>) -> Self {
        let carts = carts.into();
        let total = carts.iter().map(Cart::line_total).sum();

        Self {
            carts,
            subtotal: total,
            grand_total: total,
        }
    }

    /// Cart lines.
    pub fn carts(&self) -> &[Cart] {
        &self.carts
    }

    /// Subtotal.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Grand total.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Iterate the non-empty line identifiers in cart order.
    pub fn additional_ids(&self) -> impl Iterator<Item = &str> {
        self.carts
            .iter()
            .filter_map(|cart| cart.additional_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn test_lines() -> [Cart; 3] {
        [
            Cart::new(dec!(50000), 1).with_additional_id("KFC-123"),
            Cart::new(dec!(10000), 2),
            Cart::new(dec!(2.50), 4).with_additional_id(""),
        ]
    }

    #[test]
    fn line_total_multiplies_price_by_qty() {
        assert_eq!(Cart::new(dec!(2.50), 4).line_total(), dec!(10));
        assert_eq!(Cart::new(dec!(99), 0).line_total(), Decimal::ZERO);
    }

    #[test]
    fn new_keeps_caller_aggregates() {
        let cart = ShoppingCart::new(test_lines(), dec!(1), dec!(2));

        assert_eq!(cart.subtotal(), dec!(1));
        assert_eq!(cart.grand_total(), dec!(2));
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn from_lines_sums_line_totals() {
        let cart = ShoppingCart::from_lines(test_lines());

        assert_eq!(cart.subtotal(), dec!(70010));
        assert_eq!(cart.grand_total(), dec!(70010));
    }

    #[test]
    fn additional_ids_skips_missing_and_empty() {
        let cart = ShoppingCart::from_lines(test_lines());

        assert_eq!(cart.additional_ids().collect::<Vec<_>>(), vec!["KFC-123"]);
    }

    #[test]
    fn is_empty() {
        let empty_cart = ShoppingCart::from_lines([]);

        assert!(empty_cart.is_empty());
        assert_eq!(empty_cart.subtotal(), Decimal::ZERO);
        assert!(!ShoppingCart::from_lines(test_lines()).is_empty());
    }
}
