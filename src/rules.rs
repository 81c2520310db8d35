//! Eligibility Rules
//!
//! Checks the engine cannot make on its own (stock, SKU availability, ...) run after the
//! schema scan. A failing rule keeps its own reason, so callers can tell it apart from a
//! malformed promotion.

use std::fmt;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::cart::ShoppingCart;

/// A rule rejected the cart.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{rule} rejected the cart: {reason}")]
pub struct RuleViolation {
    /// Name of the failing rule
    pub rule: String,

    /// The rule's own explanation
    pub reason: String,
}

/// A caller-supplied predicate over the cart.
pub trait EligibilityRule {
    /// Short name used in violations.
    fn name(&self) -> &str;

    /// Check the cart.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the cart is not eligible.
    fn check(&self, cart: &ShoppingCart) -> Result<(), String>;
}

/// Run rules in order, stopping at the first violation.
///
/// # Errors
///
/// Returns the [`RuleViolation`] of the first failing rule.
pub fn check_rules(
    cart: &ShoppingCart,
    rules: &[&dyn EligibilityRule],
) -> Result<(), RuleViolation> {
    rules.iter().try_for_each(|rule| {
        rule.check(cart).map_err(|reason| RuleViolation {
            rule: rule.name().to_string(),
            reason,
        })
    })
}

/// Every identified cart line must reference an available SKU.
///
/// Lines without an `additional_id` are ignored.
#[derive(Debug, Clone, Default)]
pub struct AvailableSkus {
    skus: FxHashSet<String>,
}

impl AvailableSkus {
    /// Create a rule accepting the given SKUs.
    pub fn new(skus: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            skus: skus.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `sku` is available.
    pub fn contains(&self, sku: &str) -> bool {
        self.skus.contains(sku)
    }
}

impl EligibilityRule for AvailableSkus {
    fn name(&self) -> &str {
        "available skus"
    }

    fn check(&self, cart: &ShoppingCart) -> Result<(), String> {
        match cart.additional_ids().find(|id| !self.contains(id)) {
            Some(id) => Err(format!("SKU {id} not available")),
            None => Ok(()),
        }
    }
}

/// A named closure rule.
pub struct FnRule<F> {
    name: String,
    check: F,
}

impl<F> FnRule<F>
where
    F: Fn(&ShoppingCart) -> Result<(), String>,
{
    /// Wrap a closure as a rule.
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

impl<F> EligibilityRule for FnRule<F>
where
    F: Fn(&ShoppingCart) -> Result<(), String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, cart: &ShoppingCart) -> Result<(), String> {
        (self.check)(cart)
    }
}
