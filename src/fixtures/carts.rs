//! Cart Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::cart::{Cart, ShoppingCart};

/// Wrapper for carts in YAML
#[derive(Debug, Deserialize)]
pub struct CartsFixture {
    /// Map of cart key -> cart fixture
    pub carts: FxHashMap<String, CartFixture>,
}

/// Cart fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines
    #[serde(default)]
    pub lines: Vec<Cart>,

    /// Subtotal; the sum of the lines when omitted
    #[serde(default)]
    pub subtotal: Option<Decimal>,

    /// Grand total; the subtotal when omitted
    #[serde(default)]
    pub grand_total: Option<Decimal>,
}

impl From<CartFixture> for ShoppingCart {
    fn from(fixture: CartFixture) -> Self {
        let subtotal = fixture
            .subtotal
            .unwrap_or_else(|| fixture.lines.iter().map(Cart::line_total).sum());
        let grand_total = fixture.grand_total.unwrap_or(subtotal);

        ShoppingCart::new(fixture.lines, subtotal, grand_total)
    }
}
